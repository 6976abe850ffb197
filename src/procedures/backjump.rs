//! Reverting the trail after a conflict, or for a restart.

use crate::{context::Context, db::LevelIndex, misc::log::targets};

impl Context {
    /// Reverts the trail to the given decision level.
    ///
    /// Every literal assigned above the level is unset, with its polarity
    /// saved as the phase for a later decision, and its variable returned to
    /// the decision reservoir. The propagation head rewinds with the trail.
    ///
    /// A backjump to the current level or above does nothing.
    pub fn backjump(&mut self, target_level: LevelIndex) {
        if self.trail.level() <= target_level {
            return;
        }
        log::trace!(target: targets::BACKJUMP, "Backjump from {} to {}", self.trail.level(), target_level);

        let separator = self.trail.separator(target_level);
        for index in (separator..self.trail.len()).rev() {
            self.variable_db.clear_value(self.trail.at(index));
        }
        self.trail.truncate(target_level, separator);
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

    #[test]
    fn assignments_and_phases_are_reverted() {
        let mut context = Context::from_config(Config::default());
        context.create_variables(3);

        let p = Literal::fresh(0, true);
        let q = Literal::fresh(1, false);
        let r = Literal::fresh(2, true);

        context.assign_literal(p, ClauseRef::INVALID);

        context.trail.new_level();
        context.assign_literal(q, ClauseRef::INVALID);
        context.trail.new_level();
        context.assign_literal(r, ClauseRef::INVALID);

        context.backjump(1);

        assert!(context.variable_db.value_of(0).is_true());
        assert!(context.variable_db.value_of(1).is_false());
        assert!(context.variable_db.value_of(2).is_unset());
        assert!(context.variable_db.saved_polarity(2));
        assert_eq!(context.trail.level(), 1);

        context.backjump(0);

        assert!(context.variable_db.value_of(0).is_true());
        assert!(context.variable_db.value_of(1).is_unset());
        assert!(!context.variable_db.saved_polarity(1));
        assert_eq!(context.trail.len(), 1);
    }
}
