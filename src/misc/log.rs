pub mod targets {
    pub const ANALYSIS: &str = "analysis";
    pub const BACKJUMP: &str = "backjump";
    pub const CLAUSE_DB: &str = "clause_db";
    pub const DECISION: &str = "decision";
    pub const PREPROCESSING: &str = "preprocessing";
    pub const PROPAGATION: &str = "propagation";
    pub const REDUCTION: &str = "reduction";
    pub const SOLVE: &str = "solve";
}
