//! Error types for the docrank library.

use thiserror::Error;

/// Errors surfaced by docrank operations.
///
/// Component functions never swallow failures: everything propagates to the
/// caller boundary, which is expected to log and translate into a
/// client-facing response. An empty search result or a zero-row
/// recalculation is a successful outcome, not an error.
#[derive(Error, Debug)]
pub enum DocrankError {
    /// The word-statistics store is unreachable or a query against it
    /// failed. A recalculation that hits this rolls back entirely.
    #[error("data access failure: {0}")]
    DataAccess(String),

    /// The lemmatizer is unavailable or returned malformed output. A search
    /// fails fast on this rather than scoring against unnormalized text.
    #[error("upstream service failure: {0}")]
    UpstreamService(String),

    /// An I/O call exceeded its configured deadline. Retryable.
    #[error("operation timed out: {0}")]
    Timeout(String),

    /// Reserved for structural-filter validation. Filters are currently all
    /// individually optional and freely combinable, so nothing constructs
    /// this today.
    #[error("invalid filter combination: {0}")]
    InvalidFilter(String),

    /// Caller misuse of the API.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl DocrankError {
    pub fn data_access(msg: impl Into<String>) -> Self {
        DocrankError::DataAccess(msg.into())
    }

    pub fn upstream_service(msg: impl Into<String>) -> Self {
        DocrankError::UpstreamService(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        DocrankError::Timeout(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        DocrankError::InvalidArgument(msg.into())
    }

    /// Whether retrying the failed operation may succeed without any
    /// intervention. Recalculation is idempotent, so retrying it after a
    /// timeout is always safe.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DocrankError::Timeout(_))
    }
}

/// Result type alias for docrank operations.
pub type Result<T> = std::result::Result<T, DocrankError>;
