//! Picking a literal to branch on.
//!
//! Branching is uniformly random over the reservoir of unset variables, with
//! the polarity of the picked variable taken from its saved phase.
//!
//! The reservoir may hold variables assigned since it was last rebuilt; those
//! are discarded as they surface.

use rand::Rng;

use crate::{context::Context, misc::log::targets, structures::literal::Literal};

impl Context {
    /// A literal on some unset variable, or none if every variable is
    /// assigned.
    pub fn pick_branch_literal(&mut self) -> Option<Literal> {
        while self.variable_db.unset_count() != 0 {
            let index = self.rng.gen_range(0..self.variable_db.unset_count());
            let variable = self.variable_db.take_unset(index);

            if self.variable_db.value_of(variable).is_unset() {
                let literal = Literal::fresh(variable, self.variable_db.saved_polarity(variable));
                log::trace!(target: targets::DECISION, "Decision {literal}");
                return Some(literal);
            }
        }

        None
    }
}
