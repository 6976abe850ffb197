//! General types.

/// The result of a solve, or of a search episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Some assignment satisfies the formula.
    Satisfiable,
    /// No assignment satisfies the formula.
    Unsatisfiable,
    /// No answer; from a solve, only for a formula with no variables or no
    /// clauses, and from a search episode, on reaching the conflict budget.
    Unknown,
}

impl Report {
    /// The conventional process exit code for the result.
    pub fn exit_code(self) -> i32 {
        match self {
            Report::Unknown => 0,
            Report::Satisfiable => 10,
            Report::Unsatisfiable => 20,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Satisfiable => write!(f, "SAT"),
            Report::Unsatisfiable => write!(f, "UNSAT"),
            Report::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
