//! Error types for pattern extraction.

use qualia_nlp::{PatternNotFound, PipelineError};
use thiserror::Error;

/// The common error type of [`SemanticSequence::extract`].
///
/// Only [`ExtractError::NotFound`] is recoverable: the caller records the
/// evidence as unresolved and continues. The other variants abort the
/// current subject word.
///
/// [`SemanticSequence::extract`]: crate::sequence::SemanticSequence::extract
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extraction rule exhausted the dependency tree without a match.
    #[error(transparent)]
    NotFound(#[from] PatternNotFound),

    /// The rendered trigger expression failed to compile.
    #[error("invalid trigger expression: {0}")]
    Trigger(#[from] regex::Error),

    /// The language pipeline failed to parse the evidence.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ExtractError {
    /// Whether this failure is the recoverable per-evidence signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExtractError::NotFound(_))
    }
}
