//! The assignment trail.
//!
//! Literals are pushed in the order they are assigned, with separators marking
//! where each decision level begins: `separators[d]` is the first trail
//! position belonging to level `d + 1`, and the current decision level is the
//! number of separators.
//!
//! The propagation head points to the next literal whose consequences have not
//! been examined. Propagation consumes literals from the head; a conflict
//! pushes the head to the end of the trail.

use crate::{db::LevelIndex, structures::literal::Literal};

pub struct Trail {
    literals: Vec<Literal>,
    separators: Vec<usize>,
    propagation_head: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Trail {
            literals: Vec::with_capacity(capacity),
            separators: Vec::default(),
            propagation_head: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn at(&self, index: usize) -> Literal {
        self.literals[index]
    }

    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.separators.len()
    }

    /// Opens a new decision level at the current end of the trail.
    pub fn new_level(&mut self) {
        self.separators.push(self.literals.len());
    }

    /// The trail position at which the given level ends.
    pub fn separator(&self, level: LevelIndex) -> usize {
        self.separators[level]
    }

    pub fn separators(&self) -> &[usize] {
        &self.separators
    }

    /// The next literal to propagate, if any, advancing the head.
    pub fn next_to_propagate(&mut self) -> Option<Literal> {
        match self.literals.get(self.propagation_head) {
            Some(literal) => {
                self.propagation_head += 1;
                Some(*literal)
            }
            None => None,
        }
    }

    /// Pushes the propagation head to the end of the trail, abandoning any
    /// literals queued behind a conflict.
    pub fn exhaust(&mut self) {
        self.propagation_head = self.literals.len();
    }

    /// Shrinks the trail to the given level, with `separator` its end
    /// position, and rewinds the propagation head.
    pub fn truncate(&mut self, level: LevelIndex, separator: usize) {
        self.literals.truncate(separator);
        self.separators.truncate(level);
        self.propagation_head = separator;
    }
}
