//! Top-level simplification of the clause stores.
//!
//! At decision level zero the valuation is permanent, so any clause satisfied
//! by it can be removed outright, and any false literal can be deleted from
//! the clauses that remain.
//!
//! Watched positions are left alone: absent a top-level conflict neither can
//! be false, as propagation of the permanent assignments has completed.

use crate::{context::Context, db::keys::ClauseRef, misc::log::targets, types::err};

impl Context {
    /// Propagates the top level and garbage-collects both clause stores,
    /// then rebuilds and reshuffles the decision reservoir.
    ///
    /// An error carries the conflicting clause: the formula is unsatisfiable.
    pub fn simplify(&mut self) -> Result<(), err::Propagation> {
        debug_assert_eq!(self.trail.level(), 0);

        self.propagate()?;

        self.remove_satisfied_clauses(true);
        self.remove_satisfied_clauses(false);

        self.variable_db.rebuild_unset(&mut self.rng);

        Ok(())
    }

    fn remove_satisfied_clauses(&mut self, learned: bool) {
        let size = match learned {
            true => self.clause_db.learned_size(),
            false => self.clause_db.original_size(),
        };

        let mut removed = 0;
        for index in 0..size as u32 {
            let clause_ref = ClauseRef::fresh(index, learned);
            let clause = self.clause_db.get(clause_ref);
            if clause.is_empty() {
                continue;
            }

            let satisfied = clause
                .iter()
                .any(|literal| self.variable_db.literal_true(*literal));

            if satisfied {
                self.detach_clause(clause_ref);
                removed += 1;
            } else {
                debug_assert!(self.variable_db.value_of(clause[0].var()).is_unset());
                debug_assert!(self.variable_db.value_of(clause[1].var()).is_unset());

                let clause = self.clause_db.get_mut(clause_ref);
                let mut position = 2;
                while position < clause.len() {
                    let literal = clause[position];
                    if self.variable_db.literal_false(literal) {
                        clause.swap_remove(position);
                    } else {
                        position += 1;
                    }
                }
            }
        }

        if removed > 0 {
            log::trace!(target: targets::PREPROCESSING, "Removed {removed} satisfied clauses (learned: {learned})");
        }
    }
}
