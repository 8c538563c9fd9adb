//! Error types for the predictor collaborator.

use thiserror::Error;

/// The common error type used by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// The predictor service could not be reached or answered with an error.
    #[error("prediction request failed: {0}")]
    Http(String),

    /// The predictor's response could not be interpreted.
    #[error("malformed prediction response: {0}")]
    Malformed(String),

    /// The prompt carries no blank marker to predict.
    #[error("prompt contains no blank marker")]
    NoBlank,

    /// The prompt carries more blanks than any declared template uses.
    #[error("prompt contains {0} blank markers, more than the supported maximum")]
    TooManyBlanks(usize),
}
