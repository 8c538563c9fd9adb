//! The candidate type.

use std::hash::{Hash, Hasher};

use serde::Serialize;

/// One extracted candidate: a normalized word or phrase, its metric score,
/// and the evidence snippets it was extracted from.
///
/// Identity is the normalized string alone; score and provenance never
/// participate in equality or hashing.
#[derive(Debug, Clone, Serialize)]
pub struct QualiaElement {
    pub word: String,
    pub score: f64,
    pub sources: Vec<String>,
}

impl QualiaElement {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            score: 0.0,
            sources: Vec::new(),
        }
    }

    pub fn with_sources(word: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            word: word.into(),
            score: 0.0,
            sources,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl PartialEq for QualiaElement {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for QualiaElement {}

impl Hash for QualiaElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}
