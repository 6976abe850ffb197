//! The context of a solve.
//!
//! A context owns every database relevant to a solve together with the
//! configuration, statistics, and the source of randomness, and the procedures
//! for a solve are methods on the context.
//!
//! ```rust
//! # use mink_sat::config::Config;
//! # use mink_sat::context::Context;
//! # use mink_sat::structures::literal::Literal;
//! # use mink_sat::types::gen::Report;
//! let mut context = Context::from_config(Config::default());
//! context.create_variables(2);
//!
//! let p = Literal::fresh(0, true);
//! let q = Literal::fresh(1, true);
//!
//! assert!(context.add_clause(&[p, q]));
//! assert!(context.add_clause(&[-p]));
//!
//! assert_eq!(context.solve(), Report::Satisfiable);
//! ```

use rand::SeedableRng;

use crate::{
    config::Config,
    db::{clause::ClauseDB, keys::ClauseRef, trail::Trail, variable::VariableDB, watches::WatchDB},
    generic::mt19937::Mt19937,
    structures::literal::{Literal, VariableValue},
};

/// Counts of the problem instance and the work of a solve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Variables created.
    pub variables: u64,
    /// Original clauses attached (satisfied and unit clauses are not).
    pub clauses: u64,
    /// Clauses offered for addition, attached or not.
    pub clause_additions: u64,
    /// Literals in attached original clauses.
    pub literals: u64,
    /// Learned clauses attached.
    pub learned_clauses: u64,
    /// Literals in attached learned clauses.
    pub learned_literals: u64,
    /// Search episodes started.
    pub restarts: u64,
    /// Decisions made.
    pub decisions: u64,
    /// Conflicts found.
    pub conflicts: u64,
    /// Literals propagated.
    pub propagations: u64,
}

/// What is known of the formula outside a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FormulaStatus {
    Unknown,
    /// Unsatisfiability surfaced while adding clauses.
    Unsatisfiable,
}

pub struct Context {
    pub config: Config,
    pub counters: Statistics,

    pub clause_db: ClauseDB,
    pub variable_db: VariableDB,
    pub watch_db: WatchDB,
    pub trail: Trail,

    pub(crate) status: FormulaStatus,
    pub(crate) rng: Mt19937,

    pub(crate) max_learned_clauses: f64,
    pub(crate) learned_size_adjust_on_conflict: f64,
    pub(crate) learned_size_adjust_count: u64,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        use crate::config::defaults;
        Context {
            counters: Statistics::default(),
            clause_db: ClauseDB::from_config(&config),
            variable_db: VariableDB::new(0),
            watch_db: WatchDB::new(0),
            trail: Trail::with_capacity(0),
            status: FormulaStatus::Unknown,
            rng: Mt19937::seed_from_u64(config.rng_seed),
            max_learned_clauses: 0.0,
            learned_size_adjust_on_conflict: defaults::LEARNED_SIZE_ADJUST_START,
            learned_size_adjust_count: defaults::LEARNED_SIZE_ADJUST_START as u64,
            config,
        }
    }

    /// Sizes every database for `count` variables.
    ///
    /// Must be called once, before any clause is added.
    pub fn create_variables(&mut self, count: u32) {
        debug_assert!(self.counters.variables == 0 && self.trail.is_empty());
        self.counters.variables = count as u64;
        self.variable_db = VariableDB::new(count);
        self.watch_db = WatchDB::new(count);
        self.trail = Trail::with_capacity(count as usize + 1);
    }

    pub fn variable_count(&self) -> u64 {
        self.counters.variables
    }

    /// The count of attached original clauses.
    pub fn clause_count(&self) -> u64 {
        self.counters.clauses
    }

    pub fn statistics(&self) -> &Statistics {
        &self.counters
    }

    /// The valuation, total after a satisfiable solve.
    pub fn model(&self) -> &[VariableValue] {
        self.variable_db.values()
    }

    /// Assigns a literal at the current decision level, recording the clause
    /// which forced it, and queues it for propagation.
    pub fn assign_literal(&mut self, literal: Literal, reason: ClauseRef) {
        self.variable_db
            .set_value(literal, self.trail.level(), reason);
        self.trail.push(literal);
    }
}
