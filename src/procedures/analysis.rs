//! Learning a clause from a conflict.
//!
//! # Overview
//!
//! Analysis resolves the conflicting clause against the reasons of trail
//! literals, most recent first, until exactly one literal assigned at the
//! current decision level remains: the first unique implication point.
//! Its negation is placed at position 0 of the learned clause, so the clause
//! asserts that literal as soon as the trail is reverted.
//!
//! The remaining literals of the learned clause are then minimised: a literal
//! is dropped when every ancestor in its reason graph is already part of the
//! clause, or is itself droppable. The walk over the reason graph is iterative
//! with an explicit stack, as implication chains may be deep enough to
//! overflow the call stack.
//!
//! Finally the literal with the highest decision level among positions 1… is
//! swapped to position 1; its level is the backjump level, and the two
//! leading positions are exactly the watches wanted when the clause is
//! attached.

use crate::{
    context::Context,
    db::{keys::ClauseRef, LevelIndex},
    misc::log::targets,
    structures::{
        clause::{self, CClause},
        literal::Literal,
    },
};

/// How a variable relates to the conflict under analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SeenStatus {
    /// Not (yet) relevant to the conflict.
    Unset,
    /// A source of the conflict.
    IsSource,
    /// A source, though redundant in the learned clause.
    Removable,
    /// A source which some path witnesses cannot be removed.
    RemovalFailed,
}

impl Context {
    /// Derives a learned clause and backjump level from a conflict.
    ///
    /// The learned clause asserts its first literal after a backjump to the
    /// returned level. Must be called above decision level zero.
    pub fn conflict_analysis(&mut self, conflict: ClauseRef) -> (CClause, LevelIndex) {
        debug_assert!(self.trail.level() > 0);
        log::trace!(target: targets::ANALYSIS, "Analysis of {conflict} at level {}", self.trail.level());

        let mut seen = vec![SeenStatus::Unset; self.counters.variables as usize];

        // Position 0 is reserved for the asserting literal.
        let mut learned: CClause = vec![Literal::INVALID];
        let mut pivot = Literal::INVALID;
        let mut conflict = conflict;
        let mut index = self.trail.len();
        let mut path_length: usize = 0;

        loop {
            debug_assert!(conflict.valid());
            if conflict.is_learned() {
                self.clause_db.bump_activity(conflict);
            }

            // Position 0 of a reason holds the pivot, already resolved upon.
            let start = if pivot.valid() { 1 } else { 0 };
            let clause = self.clause_db.get(conflict);
            for position in start..clause.len() {
                let literal = clause[position];
                let variable = literal.var();

                if seen[variable as usize] == SeenStatus::Unset
                    && self.variable_db.level(variable) > 0
                {
                    seen[variable as usize] = SeenStatus::IsSource;

                    if self.variable_db.level(variable) >= self.trail.level() {
                        path_length += 1;
                    } else {
                        learned.push(literal);
                    }
                }
            }

            // The next seen trail literal is the pivot to resolve on.
            index -= 1;
            while seen[self.trail.at(index).var() as usize] == SeenStatus::Unset {
                index -= 1;
            }
            pivot = self.trail.at(index);
            conflict = self.variable_db.reason(pivot.var());
            seen[pivot.var() as usize] = SeenStatus::Unset;
            path_length -= 1;

            if path_length == 0 {
                break;
            }
        }
        learned[0] = pivot.negate();

        // Minimisation. Literals assigned by decision are always needed.
        let mut kept = 1;
        for index in 1..learned.len() {
            let literal = learned[index];
            if !self.variable_db.reason(literal.var()).valid()
                || !self.literal_redundant(&mut seen, literal)
            {
                learned[kept] = literal;
                kept += 1;
            }
        }
        if kept < learned.len() {
            log::trace!(target: targets::ANALYSIS, "Minimisation dropped {} literals", learned.len() - kept);
            learned.truncate(kept);
        }

        let mut backjump_level = 0;
        if learned.len() > 1 {
            let mut deepest = 1;
            for position in 2..learned.len() {
                if self.variable_db.level(learned[position].var())
                    > self.variable_db.level(learned[deepest].var())
                {
                    deepest = position;
                }
            }
            learned.swap(1, deepest);
            backjump_level = self.variable_db.level(learned[1].var());
        }

        log::trace!(target: targets::ANALYSIS, "Learned {} asserting at level {backjump_level}", clause::as_dimacs(&learned));
        (learned, backjump_level)
    }

    /// Whether every path from the literal through its reason graph reaches
    /// only literals already seen as sources, or assigned at level zero.
    ///
    /// Variables on a failing path are marked, as are redundant variables, so
    /// repeated checks against the same conflict terminate quickly.
    fn literal_redundant(&self, seen: &mut [SeenStatus], literal: Literal) -> bool {
        debug_assert!(self.variable_db.reason(literal.var()).valid());

        let mut literal = literal;
        let mut clause = self.clause_db.get(self.variable_db.reason(literal.var()));
        let mut position = 1;
        let mut stack: Vec<(usize, Literal)> = Vec::default();

        loop {
            if position < clause.len() {
                let parent = clause[position];
                let variable = parent.var();

                // Settled one way…
                if self.variable_db.level(variable) == 0
                    || seen[variable as usize] == SeenStatus::IsSource
                    || seen[variable as usize] == SeenStatus::Removable
                {
                    position += 1;
                    continue;
                }

                // …or the other: a decision, or a known failure.
                if !self.variable_db.reason(variable).valid()
                    || seen[variable as usize] == SeenStatus::RemovalFailed
                {
                    stack.push((0, literal));
                    for (_, on_path) in &stack {
                        if seen[on_path.var() as usize] == SeenStatus::Unset {
                            seen[on_path.var() as usize] = SeenStatus::RemovalFailed;
                        }
                    }
                    return false;
                }

                // Undetermined: descend into the parent's reason.
                stack.push((position, literal));
                literal = parent;
                clause = self.clause_db.get(self.variable_db.reason(literal.var()));
                position = 1;
            } else {
                // Every parent checked out.
                if seen[literal.var() as usize] == SeenStatus::Unset {
                    seen[literal.var() as usize] = SeenStatus::Removable;
                }

                match stack.pop() {
                    None => break,
                    Some((resume, resumed)) => {
                        literal = resumed;
                        clause = self.clause_db.get(self.variable_db.reason(literal.var()));
                        position = resume + 1;
                    }
                }
            }
        }

        true
    }
}
