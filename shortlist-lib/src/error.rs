//! Error types for Shortlist

use thiserror::Error;

/// Result type alias for Shortlist operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Shortlist operations
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog source unreadable, missing required columns, or empty
    #[error("catalog load error: {0}")]
    CatalogLoad(String),

    /// Query is empty or whitespace-only
    #[error("query must not be empty")]
    EmptyQuery,

    /// Invalid argument provided (e.g. `top_k == 0`)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to load or run the embedding model
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Configuration unreadable or inconsistent
    #[error("config error: {0}")]
    Config(String),
}

/// Coarse error classification for callers that map errors to their own
/// presentation (HTTP status, CLI exit code, form warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Catalog source unreadable, empty, or missing a required field
    CatalogLoad,
    /// Query was blank after trimming
    EmptyQuery,
    /// Caller passed an out-of-range argument such as `top_k == 0`
    InvalidArgument,
    /// Vector backend failed to load or encode
    Embedding,
    /// Engine configuration invalid or unreadable
    Config,
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CatalogLoad(_) => ErrorKind::CatalogLoad,
            Error::EmptyQuery => ErrorKind::EmptyQuery,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Embedding(_) => ErrorKind::Embedding,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Whether the caller can recover by supplying different input.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::EmptyQuery | ErrorKind::InvalidArgument)
    }
}
