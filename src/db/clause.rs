//! The clause database.
//!
//! Clauses live in two arenas, one for original clauses and one for learned
//! clauses, with the origin of a clause carried by its [ClauseRef].
//!
//! Arenas hand out stable indices: removing a clause clears the slot to an
//! empty sequence rather than shifting later clauses, and the slot is recycled
//! by a later addition. Anything iterating an arena skips the empty slots.
//!
//! Learned clauses carry an activity, bumped whenever the clause is used in
//! conflict analysis and decayed (by growing the increment) after each
//! conflict.

use crate::{
    config::{Activity, Config},
    db::keys::{ClauseIndex, ClauseRef},
    misc::log::targets,
    structures::clause::CClause,
};

/// Rescale activities once one passes this bound, preserving their order.
const RESCALE_LIMIT: Activity = 1e20;
const RESCALE_FACTOR: Activity = 1e-20;

/// A single arena of clauses with stable indices and slot recycling.
#[derive(Default)]
pub struct ClauseArena {
    clauses: Vec<CClause>,
    activities: Vec<Activity>,
    free_indices: Vec<ClauseIndex>,
}

impl ClauseArena {
    /// An upper bound on the clauses stored, including cleared slots.
    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    fn add(&mut self, literals: CClause) -> ClauseIndex {
        match self.free_indices.pop() {
            Some(index) => {
                self.clauses[index as usize] = literals;
                self.activities[index as usize] = 0.0;
                index
            }
            None => {
                let index = self.clauses.len() as ClauseIndex;
                self.clauses.push(literals);
                self.activities.push(0.0);
                index
            }
        }
    }

    fn remove(&mut self, index: usize) {
        if index + 1 == self.clauses.len() {
            self.clauses.pop();
            self.activities.pop();
        } else {
            self.clauses[index].clear();
            self.activities[index] = 0.0;
            self.free_indices.push(index as ClauseIndex);
        }
    }
}

/// The clause database of a context.
pub struct ClauseDB {
    original: ClauseArena,
    learned: ClauseArena,

    activity_increment: Activity,
    activity_decay: Activity,
}

impl ClauseDB {
    pub fn from_config(config: &Config) -> Self {
        ClauseDB {
            original: ClauseArena::default(),
            learned: ClauseArena::default(),
            activity_increment: 1.0,
            activity_decay: config.clause_activity_decay,
        }
    }

    fn arena(&self, clause_ref: ClauseRef) -> &ClauseArena {
        match clause_ref.is_learned() {
            true => &self.learned,
            false => &self.original,
        }
    }

    /// Stores a clause, returning a reference whose origin matches `learned`.
    pub fn add(&mut self, literals: CClause, learned: bool) -> ClauseRef {
        let index = match learned {
            true => self.learned.add(literals),
            false => self.original.add(literals),
        };
        let clause_ref = ClauseRef::fresh(index, learned);
        log::trace!(target: targets::CLAUSE_DB, "Stored {clause_ref}");
        clause_ref
    }

    /// Clears the slot of a clause for reuse.
    pub fn remove(&mut self, clause_ref: ClauseRef) {
        debug_assert!(clause_ref.valid());
        log::trace!(target: targets::CLAUSE_DB, "Removed {clause_ref}");
        match clause_ref.is_learned() {
            true => self.learned.remove(clause_ref.index()),
            false => self.original.remove(clause_ref.index()),
        }
    }

    pub fn get(&self, clause_ref: ClauseRef) -> &CClause {
        debug_assert!(clause_ref.valid());
        &self.arena(clause_ref).clauses[clause_ref.index()]
    }

    pub fn get_mut(&mut self, clause_ref: ClauseRef) -> &mut CClause {
        debug_assert!(clause_ref.valid());
        match clause_ref.is_learned() {
            true => &mut self.learned.clauses[clause_ref.index()],
            false => &mut self.original.clauses[clause_ref.index()],
        }
    }

    pub fn activity(&self, clause_ref: ClauseRef) -> Activity {
        self.arena(clause_ref).activities[clause_ref.index()]
    }

    pub fn activity_increment(&self) -> Activity {
        self.activity_increment
    }

    /// An upper bound on the original clauses stored, including cleared slots.
    pub fn original_size(&self) -> usize {
        self.original.size()
    }

    /// An upper bound on the learned clauses stored, including cleared slots.
    pub fn learned_size(&self) -> usize {
        self.learned.size()
    }

    /// Adds the current increment to the activity of a learned clause.
    pub fn bump_activity(&mut self, clause_ref: ClauseRef) {
        debug_assert!(clause_ref.is_learned());
        let activity = &mut self.learned.activities[clause_ref.index()];
        *activity += self.activity_increment;

        if *activity > RESCALE_LIMIT {
            for activity in &mut self.learned.activities {
                *activity *= RESCALE_FACTOR;
            }
            self.activity_increment *= RESCALE_FACTOR;
        }
    }

    /// Grows the activity increment, so all existing activities decay
    /// relative to clauses bumped from now on.
    pub fn decay_activity(&mut self) {
        self.activity_increment *= 1.0 / self.activity_decay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::literal::Literal;

    fn binary(a: u32, b: u32) -> CClause {
        vec![Literal::fresh(a, true), Literal::fresh(b, false)]
    }

    #[test]
    fn slots_are_recycled() {
        let mut db = ClauseDB::from_config(&Config::default());

        let first = db.add(binary(0, 1), true);
        let second = db.add(binary(1, 2), true);
        let third = db.add(binary(2, 3), true);
        assert_eq!(db.learned_size(), 3);

        db.bump_activity(second);
        db.remove(second);
        assert_eq!(db.learned_size(), 3);
        assert!(db.get(second).is_empty());
        assert_eq!(db.activity(second), 0.0);

        let replacement = db.add(binary(3, 4), true);
        assert_eq!(replacement, second);
        assert_eq!(db.learned_size(), 3);

        db.remove(third);
        assert_eq!(db.learned_size(), 2);
        let _ = first;
    }

    #[test]
    fn rescale_preserves_order() {
        let mut db = ClauseDB::from_config(&Config::default());
        let low = db.add(binary(0, 1), true);
        let high = db.add(binary(1, 2), true);

        db.bump_activity(high);
        db.bump_activity(high);
        db.bump_activity(low);
        assert!(db.activity(low) < db.activity(high));

        for _ in 0..64 {
            db.decay_activity();
            db.bump_activity(high);
        }
        assert!(db.activity(low) < db.activity(high));
    }
}
