//! # Qualia NLP — tokens, dependency trees, and the language pipeline
//!
//! The extraction engine never tokenizes or parses text itself. It consumes
//! the output of an external language pipeline: a sequence of tokens, each
//! carrying its surface form, lemma, part-of-speech tag, and a dependency
//! edge to its head. This crate owns that data model and the collaborator
//! trait producing it.
//!
//! ## Core ideas
//!
//! - **The pipeline is a handle, not a global**: callers construct a
//!   [`LanguagePipeline`] implementation once and pass it down explicitly.
//! - **Tree walks are the only queries**: pattern extraction needs exactly
//!   two operations over the dependency tree — "first ancestor matching a
//!   dependency/part-of-speech filter" and "first child matching one". Both
//!   live in [`walk`] and signal a recoverable [`PatternNotFound`] on miss.
//! - **Annotations are data**: [`DepLabel`] and [`PosTag`] are plain enums
//!   mapped from Universal Dependencies names, so fixtures can be written by
//!   hand and wire formats translated without touching the engine.

pub mod pipeline;
pub mod stopwords;
pub mod token;
pub mod walk;

#[cfg(feature = "http")]
pub mod conllu;

#[cfg(feature = "helpers")]
pub mod helpers;

pub use pipeline::{LanguagePipeline, PipelineError};
pub use stopwords::is_stop_word;
pub use token::{DepLabel, PosTag, Token, TokenSequence};
pub use walk::{PatternNotFound, ancestor_matching, child_matching};
