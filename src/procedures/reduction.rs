//! Forgetting learned clauses of low activity.
//!
//! Clauses are pruned against a threshold: the smaller of the median learned
//! activity and the activity increment spread over the learned store. Binary
//! clauses are kept regardless, as are locked clauses, which stand as reasons
//! for assignments on the trail.

use crate::{context::Context, db::keys::ClauseRef, misc::log::targets};

impl Context {
    pub fn reduce_learned_clauses(&mut self) {
        let size = self.clause_db.learned_size();

        let mut indices: Vec<u32> = (0..size as u32)
            .filter(|index| !self.clause_db.get(ClauseRef::fresh(*index, true)).is_empty())
            .collect();
        if indices.is_empty() {
            return;
        }
        indices.sort_by(|a, b| {
            self.clause_db
                .activity(ClauseRef::fresh(*a, true))
                .total_cmp(&self.clause_db.activity(ClauseRef::fresh(*b, true)))
        });

        let median = self
            .clause_db
            .activity(ClauseRef::fresh(indices[indices.len() / 2], true));
        let threshold = self.clause_db.activity_increment() / size as f64;
        let prune_threshold = median.min(threshold);

        let mut removed = 0;
        for index in 0..size as u32 {
            let clause_ref = ClauseRef::fresh(index, true);
            let clause = self.clause_db.get(clause_ref);
            if clause.is_empty() {
                continue;
            }

            if clause.len() > 2
                && self.clause_db.activity(clause_ref) < prune_threshold
                && !self.locked_clause(clause_ref)
            {
                self.detach_clause(clause_ref);
                removed += 1;
            }
        }

        log::info!(target: targets::REDUCTION, "Reduction removed {removed} learned clauses");
    }
}
