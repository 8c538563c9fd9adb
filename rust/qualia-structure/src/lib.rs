//! # Qualia Structure — aggregation, ranking, and generation strategies
//!
//! The lexical-semantic profile of a subject word: four roles (formal,
//! constitutive, agentive, telic), each populated with candidates extracted
//! from natural-language evidence and ranked by a pluggable metric.
//!
//! ## The two structures
//!
//! Generation mutates a [`DebugQualiaStructure`] — per role, per pattern:
//! the candidates found (with provenance) and the evidence where the
//! trigger matched but extraction failed. Reduction ([`reduce`]) merges,
//! sorts, deduplicates, and truncates it into the published
//! [`QualiaStructure`]: bare strings, no scores, no provenance, no
//! back-reference to the working state.
//!
//! ## Strategies
//!
//! Two interchangeable [`CreationStrategy`] implementations drive the
//! pipeline: [`SearchStrategy`] extracts candidates from web-search
//! snippets and scores them with a [`Metric`]; [`PredictorStrategy`] asks
//! a masked-language model to fill prompt blanks and uses the model's
//! probabilities as scores, optionally verifying each fill against the
//! pattern's own extraction rule.

pub mod element;
pub mod error;
pub mod inflect;
pub mod metric;
pub mod reduce;
pub mod role;
pub mod strategy;
pub mod structure;
pub mod validate;

pub use element::QualiaElement;
pub use error::GenerationError;
pub use inflect::{EnglishInflector, Inflection, InflectionOverrides, Inflector};
pub use metric::Metric;
pub use reduce::debug_to_public;
pub use role::{PatternSlot, Role, RoleName};
pub use strategy::{CreationStrategy, PredictorStrategy, SearchStrategy};
pub use structure::{DebugQualiaStructure, QualiaStructure};
