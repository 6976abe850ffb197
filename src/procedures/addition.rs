//! Adding clauses to, and removing clauses from, a context.
//!
//! [add_clause](crate::context::Context::add_clause) canonicalises a clause
//! against the top-level valuation before storing it: satisfied clauses and
//! tautologies are dropped, false literals and duplicates are deleted, and
//! anything reduced to a single literal is applied as a fact rather than
//! stored.
//!
//! Clauses of two or more literals are attached, with watches on the literals
//! at positions 0 and 1.

use crate::{
    context::{Context, FormulaStatus},
    db::{keys::ClauseRef, watches::Watch},
    misc::log::targets,
    structures::{clause::CClause, literal::Literal},
};

impl Context {
    /// Canonicalises and stores a clause.
    ///
    /// Returns `false` if the formula is now provably unsatisfiable, in which
    /// case nothing further needs to be added.
    ///
    /// Must be called at decision level zero, and only after
    /// [create_variables](Context::create_variables).
    pub fn add_clause(&mut self, literals: &[Literal]) -> bool {
        debug_assert_eq!(self.trail.level(), 0);
        debug_assert!(!literals.is_empty());
        debug_assert!(literals
            .iter()
            .all(|literal| (literal.var() as u64) < self.counters.variables));

        self.counters.clause_additions += 1;

        // Sorting brings complementary and duplicate literals together.
        let mut copied = literals.to_vec();
        copied.sort_unstable();

        let mut last = Literal::INVALID;
        let mut kept = 0;
        for index in 0..copied.len() {
            let literal = copied[index];

            if self.variable_db.literal_true(literal) {
                return true;
            }
            if literal == last.negate() {
                return true;
            }
            if self.variable_db.literal_false(literal) {
                continue;
            }
            if literal == last {
                continue;
            }

            last = literal;
            copied[kept] = literal;
            kept += 1;
        }
        copied.truncate(kept);

        match copied.len() {
            0 => {
                self.status = FormulaStatus::Unsatisfiable;
                false
            }

            1 => {
                self.assign_literal(copied[0], ClauseRef::INVALID);
                match self.propagate() {
                    Ok(()) => true,
                    Err(_) => {
                        self.status = FormulaStatus::Unsatisfiable;
                        false
                    }
                }
            }

            _ => {
                self.attach_clause(copied, false);
                true
            }
        }
    }

    /// Stores a clause of two or more literals and watches its first two.
    pub fn attach_clause(&mut self, literals: CClause, learned: bool) -> ClauseRef {
        debug_assert!(literals.len() >= 2);

        let first = literals[0];
        let second = literals[1];

        match learned {
            true => {
                self.counters.learned_clauses += 1;
                self.counters.learned_literals += literals.len() as u64;
            }
            false => {
                self.counters.clauses += 1;
                self.counters.literals += literals.len() as u64;
            }
        }

        let clause_ref = self.clause_db.add(literals, learned);
        self.watch_db
            .add_watch(first.negate(), Watch::new(clause_ref, second));
        self.watch_db
            .add_watch(second.negate(), Watch::new(clause_ref, first));
        clause_ref
    }

    /// Removes a clause, first unhooking its watches.
    pub fn detach_clause(&mut self, clause_ref: ClauseRef) {
        let (first, second, length) = {
            let clause = self.clause_db.get(clause_ref);
            (clause[0], clause[1], clause.len() as u64)
        };

        self.watch_db
            .remove_watch(first.negate(), Watch::new(clause_ref, second));
        self.watch_db
            .remove_watch(second.negate(), Watch::new(clause_ref, first));

        if self.locked_clause(clause_ref) {
            log::trace!(target: targets::CLAUSE_DB, "Detached the reason of {first}");
            self.variable_db.clear_reason(first.var());
        }

        match clause_ref.is_learned() {
            true => {
                self.counters.learned_clauses -= 1;
                self.counters.learned_literals -= length;
            }
            false => {
                self.counters.clauses -= 1;
                self.counters.literals -= length;
            }
        }

        self.clause_db.remove(clause_ref);
    }

    /// Whether the clause is the reason for the assignment of its first
    /// literal, and so must be kept while the assignment stands.
    pub fn locked_clause(&self, clause_ref: ClauseRef) -> bool {
        let first = self.clause_db.get(clause_ref)[0];
        self.variable_db.literal_true(first) && self.variable_db.reason(first.var()) == clause_ref
    }
}
