//! # Qualia Patterns — the pattern language of the extraction engine
//!
//! A *semantic sequence* couples one linguistic construct ("X is a", "made
//! of", "is used to") to everything the generator needs to exploit it:
//!
//! - a **trigger expression** locating the construct around a subject word
//!   in arbitrary text,
//! - a **provider query** fetching evidence likely to contain the construct,
//! - **prompt templates** for the mask predictor, derived from the query
//!   when not declared explicitly,
//! - an **extraction rule**: a small declarative program walked against the
//!   dependency tree to reach the candidate token(s).
//!
//! Trigger matching is cheap and text-level; extraction is conservative and
//! tree-level. A trigger hit whose extraction rule finds no structurally
//! valid token is reported to the caller, never silently dropped.
//!
//! Singular/plural surface variants are separate catalogue entries sharing
//! rule values — composition over inheritance. The catalogues in [`catalog`]
//! are fixed: four roles, each with its declared set of sequences.

pub mod catalog;
pub mod error;
pub mod rule;
pub mod sequence;
pub mod trigger;

pub use catalog::{
    agentive_sequences, constitutive_sequences, formal_sequences, telic_sequences,
};
pub use error::ExtractError;
pub use rule::{Anchor, ExtractionRule, Hop, WalkRule};
pub use sequence::{BLANK, Number, SemanticSequence};
pub use trigger::{TriggerSpan, locate_spans};
