//! Structures independent of a solve.

pub mod luby;
pub mod mt19937;
