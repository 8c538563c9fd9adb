//! The language-pipeline collaborator.
//!
//! Tokenization, tagging, lemmatization, and dependency parsing happen
//! outside this workspace. The engine only depends on this trait; process
//! lifetime of the concrete pipeline is managed by whoever wires the
//! strategies together.

use async_trait::async_trait;
use thiserror::Error;

use crate::token::TokenSequence;

/// The common error type for pipeline implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The pipeline service could not be reached or answered with an error.
    #[error("language pipeline request failed: {0}")]
    Http(String),

    /// The pipeline's response could not be interpreted.
    #[error("malformed pipeline response: {0}")]
    Malformed(String),
}

/// Turns raw text into an annotated [`TokenSequence`].
///
/// Implementations may span sentence boundaries; the returned sequence
/// covers the whole input in order.
#[async_trait]
pub trait LanguagePipeline: Send + Sync {
    async fn parse(&self, text: &str) -> Result<TokenSequence, PipelineError>;
}
