//! Error types for the search collaborator.

use thiserror::Error;

/// The common error type used by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Every configured credential has reached its request limit.
    ///
    /// Fatal for the current subject word (and most likely for the rest of
    /// the batch using the same credential set).
    #[error("request limit reached for every configured credential")]
    QuotaExhausted,

    /// The credential file was missing, unreadable, or empty.
    #[error("invalid credentials: {0}")]
    Credentials(String),

    /// A search request failed at the transport or HTTP level.
    #[error("search request failed: {0}")]
    Http(String),

    /// The provider's response could not be interpreted.
    #[error("malformed search response: {0}")]
    MalformedResponse(String),

    /// The query cache could not be read or written.
    #[error("query cache failed: {0}")]
    Cache(String),
}
