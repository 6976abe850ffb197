//! The search loop, and the solve procedure which paces it.
//!
//! A solve runs search episodes under growing conflict budgets, each episode a
//! fresh start from decision level zero. Within an episode the loop is the
//! usual one: propagate, and either handle the conflict (analyse, backjump,
//! learn) or extend the valuation with a decision.

use crate::{
    context::{Context, FormulaStatus},
    db::keys::ClauseRef,
    generic::luby::luby,
    misc::log::targets,
    types::{err, gen::Report},
};

impl Context {
    /// Determines the satisfiability of the formula in the context.
    ///
    /// Returns [Report::Unknown] only for a formula with no variables or no
    /// clauses.
    pub fn solve(&mut self) -> Report {
        if self.status == FormulaStatus::Unsatisfiable {
            return Report::Unsatisfiable;
        }
        if self.counters.variables == 0 || self.counters.clause_additions == 0 {
            return Report::Unknown;
        }

        if self.simplify().is_err() {
            return Report::Unsatisfiable;
        }

        self.max_learned_clauses =
            self.counters.clauses as f64 * self.config.max_learned_clauses_factor;

        log::info!(
            target: targets::SOLVE,
            "| Conflicts | FreeVars  Clauses Literals |    Limit  Learned Lit/Cl | Progress |",
        );

        self.counters.restarts = 0;
        let mut report = Report::Unknown;
        while report == Report::Unknown {
            let budget = luby(self.config.restart_inc, self.counters.restarts as u32)
                * self.config.restart_first as f64;
            report = self.search(budget as u64);
            self.counters.restarts += 1;
        }

        report
    }

    /// A search episode, bounded by a conflict budget.
    ///
    /// Returns [Report::Unknown] on exhausting the budget, with the trail
    /// reverted to decision level zero for the next episode.
    pub fn search(&mut self, allowed_conflicts: u64) -> Report {
        let mut conflicts: u64 = 0;

        loop {
            match self.propagate() {
                Err(err::Propagation::Conflict(conflict)) => {
                    self.counters.conflicts += 1;
                    conflicts += 1;

                    // A conflict without decisions has no recovery.
                    if self.trail.level() == 0 {
                        return Report::Unsatisfiable;
                    }

                    let (learned, backjump_level) = self.conflict_analysis(conflict);
                    self.backjump(backjump_level);

                    if learned.len() == 1 {
                        self.assign_literal(learned[0], ClauseRef::INVALID);
                    } else {
                        let asserted = learned[0];
                        let clause_ref = self.attach_clause(learned, true);
                        self.clause_db.bump_activity(clause_ref);
                        self.assign_literal(asserted, clause_ref);
                    }

                    self.clause_db.decay_activity();

                    self.learned_size_adjust_count -= 1;
                    if self.learned_size_adjust_count == 0 {
                        self.learned_size_adjust_on_conflict *=
                            self.config.max_learned_adjust_increment;
                        self.learned_size_adjust_count = self.learned_size_adjust_on_conflict as u64;
                        self.max_learned_clauses *= self.config.max_learned_clauses_increment;

                        self.log_progress();
                    }
                }

                Ok(()) => {
                    if conflicts >= allowed_conflicts {
                        self.backjump(0);
                        return Report::Unknown;
                    }

                    if self.trail.level() == 0 && self.simplify().is_err() {
                        return Report::Unsatisfiable;
                    }

                    if self.clause_db.learned_size() as f64
                        >= self.max_learned_clauses + self.trail.len() as f64
                    {
                        self.reduce_learned_clauses();
                    }

                    self.counters.decisions += 1;
                    match self.pick_branch_literal() {
                        None => return Report::Satisfiable,
                        Some(literal) => {
                            self.trail.new_level();
                            self.assign_literal(literal, ClauseRef::INVALID);
                        }
                    }
                }
            }
        }
    }

    /// An estimate of search progress: the fraction of variables assigned,
    /// discounted by the decision level of each assignment.
    pub fn progress_estimate(&self) -> f64 {
        let variables = self.counters.variables as f64;
        let base = 1.0 / variables;

        let mut progress = 0.0;
        for level in 0..=self.trail.level() {
            let begin = match level {
                0 => 0,
                _ => self.trail.separator(level - 1),
            };
            let end = match level == self.trail.level() {
                true => self.trail.len(),
                false => self.trail.separator(level),
            };
            progress += base.powi(level as i32) * (end - begin) as f64;
        }

        progress / variables
    }

    fn log_progress(&self) {
        let free_variables = self.counters.variables
            - match self.trail.separators().first() {
                None => self.trail.len() as u64,
                Some(top_level) => *top_level as u64,
            };
        let literals_per_learned =
            self.counters.learned_literals as f64 / self.counters.learned_clauses as f64;

        log::info!(
            target: targets::SOLVE,
            "| {:9} | {:7} {:8} {:8} | {:8} {:8} {:6.0} | {:6.3} % |",
            self.counters.conflicts,
            free_variables,
            self.counters.clauses,
            self.counters.literals,
            self.max_learned_clauses as u64,
            self.counters.learned_clauses,
            literals_per_learned,
            self.progress_estimate() * 100.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{defaults, Config};

    // Reproducibility rests on these; a change is a change of solver.
    #[test]
    fn stock_constants() {
        let config = Config::default();
        assert_eq!(config.clause_activity_decay, 0.999);
        assert_eq!(config.max_learned_clauses_factor, 1.0 / 3.0);
        assert_eq!(config.max_learned_clauses_increment, 1.1);
        assert_eq!(config.max_learned_adjust_increment, 1.5);
        assert_eq!(config.restart_first, 100);
        assert_eq!(config.restart_inc, 2.0);
        assert_eq!(config.rng_seed, 42);
        assert_eq!(defaults::LEARNED_SIZE_ADJUST_START, 100.0);
    }
}
