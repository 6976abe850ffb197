//! The variable database.
//!
//! Holds, per variable:
//! - The current truth value.
//! - The polarity the variable last had, reused as the preferred polarity on
//!   the next decision (phase saving).
//! - The reason clause which forced the current assignment, invalid for
//!   decisions and unset variables, and the decision level of the assignment.
//!
//! And, across variables, a reservoir of unset variables from which decisions
//! are drawn at random.

use rand::seq::SliceRandom;

use crate::{
    db::{keys::ClauseRef, LevelIndex},
    structures::literal::{Literal, Variable, VariableValue},
};

/// Assignment metadata for a single variable.
#[derive(Clone, Copy)]
pub struct VariableMetadata {
    reason: ClauseRef,
    level: LevelIndex,
}

pub struct VariableDB {
    values: Vec<VariableValue>,
    saved_polarity: Vec<bool>,
    metadata: Vec<VariableMetadata>,
    unset_variables: Vec<Variable>,
}

impl VariableDB {
    pub fn new(count: u32) -> Self {
        VariableDB {
            values: vec![VariableValue::Unset; count as usize],
            saved_polarity: vec![false; count as usize],
            metadata: vec![
                VariableMetadata {
                    reason: ClauseRef::INVALID,
                    level: 0,
                };
                count as usize
            ],
            unset_variables: Vec::with_capacity(count as usize),
        }
    }

    pub fn value_of(&self, variable: Variable) -> VariableValue {
        self.values[variable as usize]
    }

    /// The current valuation, indexed by variable.
    pub fn values(&self) -> &[VariableValue] {
        &self.values
    }

    pub fn literal_true(&self, literal: Literal) -> bool {
        self.values[literal.var() as usize] == literal.polarity()
    }

    pub fn literal_false(&self, literal: Literal) -> bool {
        self.values[literal.var() as usize] == !literal.polarity()
    }

    pub fn reason(&self, variable: Variable) -> ClauseRef {
        self.metadata[variable as usize].reason
    }

    pub fn level(&self, variable: Variable) -> LevelIndex {
        self.metadata[variable as usize].level
    }

    /// Detaches a variable from its reason clause, without unsetting it.
    pub fn clear_reason(&mut self, variable: Variable) {
        self.metadata[variable as usize].reason = ClauseRef::INVALID;
    }

    pub fn set_value(
        &mut self,
        literal: Literal,
        level: LevelIndex,
        reason: ClauseRef,
    ) {
        let variable = literal.var() as usize;
        debug_assert!(self.values[variable].is_unset());

        self.values[variable] = match literal.polarity() {
            true => VariableValue::True,
            false => VariableValue::False,
        };
        self.metadata[variable] = VariableMetadata { reason, level };
    }

    /// Unsets a variable, saving its polarity as the phase for next time and
    /// returning it to the decision reservoir.
    pub fn clear_value(&mut self, literal: Literal) {
        let variable = literal.var();
        self.values[variable as usize] = VariableValue::Unset;
        self.saved_polarity[variable as usize] = literal.polarity();
        self.unset_variables.push(variable);
    }

    pub fn saved_polarity(&self, variable: Variable) -> bool {
        self.saved_polarity[variable as usize]
    }

    pub fn unset_count(&self) -> usize {
        self.unset_variables.len()
    }

    /// Removes and returns the reservoir entry at `index`, swapping the last
    /// entry into its place.
    pub fn take_unset(&mut self, index: usize) -> Variable {
        self.unset_variables.swap_remove(index)
    }

    /// Refills the reservoir with every unset variable, shuffled.
    pub fn rebuild_unset(&mut self, rng: &mut impl rand::Rng) {
        self.unset_variables.clear();
        for variable in 0..self.values.len() {
            if self.values[variable].is_unset() {
                self.unset_variables.push(variable as Variable);
            }
        }
        self.unset_variables.shuffle(rng);
    }
}
