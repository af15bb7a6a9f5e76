//! Error taxonomy for the log pipeline.

use thiserror::Error;

/// Failures that abort a whole log-processing request.
#[derive(Debug, Error)]
pub enum LogProcessError {
    /// Request rejected before any fetching started. The message is the
    /// collaborator-facing failure reason, verbatim.
    #[error("{0}")]
    Validation(String),

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// A single source failed (timeout, connection error, non-2xx). Strict
    /// all-or-nothing: no partial line set is ever returned.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A fetch worker was cancelled or panicked.
    #[error("fetch worker failed: {0}")]
    Worker(String),
}

impl LogProcessError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}

/// Why one log line was rejected. Recovered locally: the line is skipped
/// with a warning and the batch continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than the three required tokens `<id> <timestampMs> <message>`.
    #[error("expected `<id> <timestampMs> <message>`, found {found} token(s)")]
    MissingTokens { found: usize },

    /// The second token is not valid epoch milliseconds.
    #[error("timestamp is not valid epoch milliseconds: {0:?}")]
    InvalidTimestamp(String),
}
