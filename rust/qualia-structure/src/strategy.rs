//! Generation strategies.
//!
//! A strategy drives the whole pipeline for one subject word: inflection,
//! evidence production, extraction, validation, aggregation, and scoring.
//! The two implementations differ only in where evidence and candidates
//! come from — web-search snippets or mask-predictor fills.

use async_trait::async_trait;

use crate::error::GenerationError;
use crate::structure::DebugQualiaStructure;

mod predictor;
mod search;

pub use predictor::PredictorStrategy;
pub use search::SearchStrategy;

/// Produces a populated working structure for one subject word.
///
/// Processing is sequential per word and all working state lives in the
/// returned structure, so a run may be abandoned between patterns without
/// corrupting anything shared.
#[async_trait]
pub trait CreationStrategy: Send + Sync {
    async fn generate(&self, subject: &str) -> Result<DebugQualiaStructure, GenerationError>;
}
