//! Error types for the catalog search engine.

use thiserror::Error;

/// Errors surfaced by the query engine and the catalog collaborator.
///
/// There are exactly two externally visible failure classes. A superseded
/// fetch result (one whose request snapshot is no longer current when it
/// resolves) is not an error: the coordinator drops it silently.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Precondition violation in a query call, e.g. a zero page or page
    /// size. Indicates a caller bug and is never recovered into state.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The catalog service rejected or timed out a fetch. Recovered into
    /// the coordinator's Error state with the message preserved for
    /// display; prior results stay visible.
    #[error("catalog fetch failed: {0}")]
    Fetch(String),
}

impl SearchError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }
}
