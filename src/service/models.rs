pub use uuid::Uuid;

/// Outcome counts for one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Records written, or that would have been on a dry run.
    pub updated: usize,
    pub unchanged: usize,
    /// Records left alone because their type's address could not be resolved.
    pub skipped: usize,
    /// Records whose update request failed.
    pub failed: usize,
    /// Record types whose address could not be resolved.
    pub unresolved: usize,
}

