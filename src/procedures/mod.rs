//! The procedures of a solve, as methods on a [context](crate::context).
//!
//! - [addition] --- canonicalising and attaching clauses.
//! - [bcp] --- unit propagation over the watch lists.
//! - [analysis] --- learning a clause from a conflict.
//! - [backjump] --- reverting the trail to a lower decision level.
//! - [decision] --- picking a literal to branch on.
//! - [reduction] --- forgetting learned clauses of low activity.
//! - [simplify] --- removing clauses satisfied at the top level.
//! - [solve] --- the search loop, and restarts.

pub mod addition;
pub mod analysis;
pub mod backjump;
pub mod bcp;
pub mod decision;
pub mod reduction;
pub mod simplify;
pub mod solve;
