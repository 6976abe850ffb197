//! Unit propagation over the watch lists.
//!
//! # Overview
//!
//! Propagation consumes literals queued on the trail, one at a time.
//! For a literal `ℓ` made true, only clauses watching `ℓ` can have become unit
//! or falsified, as their watched literal `¬ℓ` is now false; every such clause
//! is examined, cheapest check first:
//!
//! 1. If the blocker stored with the watch is true the clause is satisfied,
//!    and the watch is kept untouched.
//! 2. Otherwise the clause is rotated so `¬ℓ` sits at position 1. If the
//!    literal at position 0 is true the clause is satisfied; the watch is
//!    kept, with that literal as the new blocker.
//! 3. Otherwise a replacement watch is searched for among the remaining
//!    literals. Any literal not false will do: it is swapped into position 1
//!    and the clause moves to the watch list of its negation.
//! 4. With no replacement the clause is unit on position 0: either that
//!    literal is false and the clause conflicts, or it is assigned with the
//!    clause as reason.
//!
//! On a conflict the propagation head is pushed to the end of the trail, so
//! any queued consequences are abandoned, and the remainder of the watch list
//! is kept as it stands.
//!
//! # A note on borrows
//!
//! The watch list under traversal is rewritten in place while other watch
//! lists gain entries, so the list is taken out of the database and restored
//! once the traversal ends. A replacement watch never lands in the taken
//! list: the replacement literal is not false, while the negation of the
//! literal being propagated is.

use crate::{
    context::Context,
    db::watches::Watch,
    misc::log::targets,
    types::err,
};

impl Context {
    /// Propagates every literal queued on the trail.
    ///
    /// Returns the conflicting clause if some clause is falsified, with the
    /// propagation queue exhausted.
    pub fn propagate(&mut self) -> Result<(), err::Propagation> {
        while let Some(literal) = self.trail.next_to_propagate() {
            self.counters.propagations += 1;

            let not_literal = literal.negate();
            let mut watches = self.watch_db.take_list(literal);

            let mut i = 0;
            let mut j = 0;
            let mut conflict = None;

            'watch_loop: while i < watches.len() {
                let blocker = watches[i].blocker;
                if self.variable_db.literal_true(blocker) {
                    watches[j] = watches[i];
                    i += 1;
                    j += 1;
                    continue 'watch_loop;
                }

                let clause_ref = watches[i].clause;
                let clause = self.clause_db.get_mut(clause_ref);
                if clause[0] == not_literal {
                    clause.swap(0, 1);
                }
                debug_assert_eq!(clause[1], not_literal);
                i += 1;

                let first = clause[0];
                let renewed = Watch::new(clause_ref, first);
                if first != blocker && self.variable_db.literal_true(first) {
                    watches[j] = renewed;
                    j += 1;
                    continue 'watch_loop;
                }

                for position in 2..clause.len() {
                    if !self.variable_db.literal_false(clause[position]) {
                        clause[1] = clause[position];
                        clause[position] = not_literal;
                        self.watch_db.add_watch(clause[1].negate(), renewed);
                        continue 'watch_loop;
                    }
                }

                // No replacement, so the clause is unit on `first`.
                watches[j] = renewed;
                j += 1;
                if self.variable_db.literal_false(first) {
                    log::trace!(target: targets::PROPAGATION, "{clause_ref} conflicts at {literal}");
                    conflict = Some(clause_ref);
                    self.trail.exhaust();
                    while i < watches.len() {
                        watches[j] = watches[i];
                        i += 1;
                        j += 1;
                    }
                } else {
                    self.assign_literal(first, clause_ref);
                }
            }

            watches.truncate(j);
            self.watch_db.restore_list(literal, watches);

            if let Some(clause_ref) = conflict {
                return Err(err::Propagation::Conflict(clause_ref));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::Config,
        context::Context,
        db::keys::ClauseRef,
        structures::literal::Literal,
    };

    fn literal(dimacs: i32) -> Literal {
        Literal::fresh(dimacs.unsigned_abs() - 1, dimacs > 0)
    }

    // After conflict-free propagation, no clause has both watched positions
    // false.
    fn watched_positions_hold(context: &Context) {
        for index in 0..context.clause_db.original_size() {
            let clause = context.clause_db.get(ClauseRef::fresh(index as u32, false));
            if clause.len() >= 2 {
                assert!(
                    !context.variable_db.literal_false(clause[0])
                        || !context.variable_db.literal_false(clause[1])
                );
            }
        }
    }

    #[test]
    fn chained_units() {
        let mut context = Context::from_config(Config::default());
        context.create_variables(4);

        assert!(context.add_clause(&[literal(-1), literal(2)]));
        assert!(context.add_clause(&[literal(-2), literal(3)]));
        assert!(context.add_clause(&[literal(-3), literal(4)]));

        context.trail.new_level();
        context.assign_literal(literal(1), ClauseRef::INVALID);
        assert!(context.propagate().is_ok());

        assert_eq!(context.trail.len(), 4);
        for variable in 0..4 {
            assert!(context.variable_db.value_of(variable).is_true());
        }
        watched_positions_hold(&context);
    }

    #[test]
    fn conflict_exhausts_the_queue() {
        let mut context = Context::from_config(Config::default());
        context.create_variables(3);

        assert!(context.add_clause(&[literal(-1), literal(2)]));
        assert!(context.add_clause(&[literal(-1), literal(-2)]));
        assert!(context.add_clause(&[literal(1), literal(3)]));

        context.trail.new_level();
        context.assign_literal(literal(1), ClauseRef::INVALID);

        assert!(context.propagate().is_err());
        assert!(context.trail.next_to_propagate().is_none());
    }

    #[test]
    fn blockers_are_refreshed() {
        let mut context = Context::from_config(Config::default());
        context.create_variables(3);

        assert!(context.add_clause(&[literal(1), literal(2), literal(3)]));

        context.trail.new_level();
        context.assign_literal(literal(3), ClauseRef::INVALID);
        context.assign_literal(literal(-1), ClauseRef::INVALID);
        assert!(context.propagate().is_ok());

        // Nothing was forced: the clause is satisfied by 3.
        assert_eq!(context.trail.len(), 2);
        watched_positions_hold(&context);
    }
}
