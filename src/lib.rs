//! A library for determining the satisfiability of boolean formulas written
//! in conjunctive normal form.
//!
//! The solver is a compact conflict-driven clause-learning engine: a
//! trail-based assignment stack, unit propagation through two watched
//! literals per clause, first-UIP conflict analysis with clause minimisation,
//! activity-driven forgetting of learned clauses, luby-paced restarts, and
//! top-level simplification. Branching is uniformly random over the unset
//! variables, with phase saving; there is no variable activity heuristic.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! A context is built from a [configuration](crate::config), and clauses may
//! be added through the [DIMACS](crate::builder) representation of a formula
//! or [programmatically](crate::context::Context::add_clause).
//! Internally, a solve is viewed in terms of a handful of
//! [databases](crate::db) manipulated by a collection of
//! [procedures](crate::procedures).
//!
//! Useful starting points:
//! - The [solve procedure](crate::procedures::solve), for the dynamics of a
//!   solve.
//! - The [database module](crate::db), for the data considered during a
//!   solve.
//! - The [structures], for the representation of literals and clauses.
//!
//! # Example
//!
//! ```rust
//! # use mink_sat::config::Config;
//! # use mink_sat::context::Context;
//! # use mink_sat::types::gen::Report;
//! let mut context = Context::from_config(Config::default());
//!
//! let dimacs = "\
//! p cnf 2 3
//! 1 -2 0
//! -1 2 0
//! 1 0
//! ";
//!
//! assert!(context.read_dimacs(dimacs.as_bytes()).is_ok());
//! assert_eq!(context.solve(), Report::Satisfiable);
//! assert!(context.model().iter().all(|value| value.is_true()));
//! ```
//!
//! # Reproducibility
//!
//! All randomness stems from a Mersenne Twister owned by the context and
//! seeded from the configuration, so a solve of the same formula with the
//! same configuration is reproducible bit for bit, down to the statistics
//! counters and the model.
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, with a target for each part of
//! the library (listed in [misc::log]) to help narrow output, e.g. with
//! [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! `RUST_LOG=reduction=info …`

pub mod builder;
pub mod config;
pub mod context;
pub mod db;
pub mod generic;
pub mod misc;
pub mod procedures;
pub mod structures;
pub mod types;
