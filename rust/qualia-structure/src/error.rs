//! Error taxonomy of a generation run.
//!
//! Everything here is fatal to the current subject word only; the caller
//! reports it keyed by word and continues the batch. The recoverable
//! conditions (trigger hit without a valid extraction, invalid candidate)
//! never surface as errors — they land in the unresolved buckets or are
//! dropped during validation.

use qualia_nlp::PipelineError;
use qualia_predict::PredictError;
use qualia_search::SearchError;
use thiserror::Error;

/// A subject word's generation failed.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The subject word could not be inflected and has no override entry.
    #[error("'{word}' cannot be inflected; add it to the inflection overrides")]
    WordNotSupported { word: String },

    /// The search provider failed; quota exhaustion arrives through here.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The mask predictor failed.
    #[error(transparent)]
    Predict(#[from] PredictError),

    /// The language pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A rendered trigger expression did not compile.
    #[error("invalid trigger expression: {0}")]
    Trigger(String),
}

impl GenerationError {
    /// Whether this is the terminal quota condition, which will also hit
    /// every later word sharing the credential set.
    pub fn is_quota_exhausted(&self) -> bool {
        matches!(self, GenerationError::Search(SearchError::QuotaExhausted))
    }
}
