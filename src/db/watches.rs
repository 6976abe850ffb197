//! The watch database.
//!
//! For each literal, the clauses currently watching that literal.
//! Each entry carries a blocker: some other literal of the clause which, when
//! true, lets propagation keep the watch without touching the clause.
//!
//! Propagation rewrites a watch list while traversing it, so the list for the
//! literal under propagation is taken out of the database and restored once
//! rewritten. Watches gained during the traversal always belong to other
//! literals, as a replacement watch is never false and the literal under
//! propagation has a false negation.

use crate::{db::keys::ClauseRef, structures::literal::Literal};

/// A clause watching a literal, with a blocker.
///
/// Two watches are equal when they refer to the same clause; the blocker is
/// mutable metadata.
#[derive(Clone, Copy, Debug)]
pub struct Watch {
    pub clause: ClauseRef,
    pub blocker: Literal,
}

impl Watch {
    pub fn new(clause: ClauseRef, blocker: Literal) -> Self {
        Watch { clause, blocker }
    }
}

impl PartialEq for Watch {
    fn eq(&self, other: &Self) -> bool {
        self.clause == other.clause
    }
}

impl Eq for Watch {}

pub struct WatchDB {
    lists: Vec<Vec<Watch>>,
}

impl WatchDB {
    /// A watch database for `count` variables, two lists per variable.
    pub fn new(count: u32) -> Self {
        let mut lists = Vec::default();
        lists.resize_with(2 * count as usize, Vec::default);
        WatchDB { lists }
    }

    pub fn add_watch(&mut self, literal: Literal, watch: Watch) {
        self.lists[literal.index()].push(watch);
    }

    /// Removes the watch equal to `watch` from the list of `literal`,
    /// preserving the order of the remaining watches.
    pub fn remove_watch(&mut self, literal: Literal, watch: Watch) {
        let list = &mut self.lists[literal.index()];
        let position = list.iter().position(|entry| *entry == watch);
        debug_assert!(position.is_some());
        if let Some(position) = position {
            list.remove(position);
        }
    }

    /// Takes the list of `literal` out of the database for rewriting.
    pub fn take_list(&mut self, literal: Literal) -> Vec<Watch> {
        std::mem::take(&mut self.lists[literal.index()])
    }

    /// Restores a rewritten list taken with [take_list](WatchDB::take_list).
    pub fn restore_list(&mut self, literal: Literal, list: Vec<Watch>) {
        debug_assert!(self.lists[literal.index()].is_empty());
        self.lists[literal.index()] = list;
    }

    #[cfg(test)]
    pub fn list(&self, literal: Literal) -> &[Watch] {
        &self.lists[literal.index()]
    }
}
