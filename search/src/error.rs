//! Typed search errors.
//!
//! `SearchError` covers precondition violations only: malformed domain input
//! detected at construction time and pre-flight policy validation. Runtime
//! terminations (goal found, frontier exhausted, deadline or budget hit) are
//! never errors; they are expressed via [`crate::search::SearchOutcome`].

/// Typed failure for search preconditions.
///
/// These errors are returned before any node is expanded. No
/// `SearchResult` is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The domain supplied input that would break the frontier ordering
    /// (e.g. a negative edge cost).
    MalformedInput { detail: String },
    /// The search policy cannot be honored (e.g. a time limit too large to
    /// form a deadline).
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput { detail } => write!(f, "malformed domain input: {detail}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Failure while replaying an action sequence against a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The action at `index` is not among the successors of the state
    /// reached by the preceding actions.
    IllegalAction { index: usize },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalAction { index } => {
                write!(f, "action {index} is not a legal successor during replay")
            }
        }
    }
}

impl std::error::Error for ReplayError {}
