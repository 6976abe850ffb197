//! The canonical clause representation.
//!
//! A clause is an ordered sequence of literals.
//! After a clause has been attached to the watch lists the literals at
//! positions 0 and 1 are the watched literals, and an empty sequence marks a
//! deleted slot in a clause store.

use crate::structures::literal::Literal;

/// A clause, as stored.
pub type CClause = Vec<Literal>;

/// The DIMACS representation of a clause, `0` terminated.
pub fn as_dimacs(clause: &[Literal]) -> String {
    let mut string = String::new();
    for literal in clause {
        string.push_str(&format!("{literal} "));
    }
    string.push('0');
    string
}
