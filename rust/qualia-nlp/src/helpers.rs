//! Test helpers: hand-annotation builders and a fixture pipeline.
//!
//! Extraction tests need dependency trees with known shapes. Instead of
//! shipping a parser, tests annotate their sentences by hand with [`tok`]
//! and register them in a [`FixturePipeline`], which answers `parse` calls
//! from the registry. Unregistered text falls back to a naive
//! one-token-per-word annotation (identity lemma, noun tag), which is
//! enough for lemma lookups on single words.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::pipeline::{LanguagePipeline, PipelineError};
use crate::token::{DepLabel, PosTag, Token, TokenSequence};

/// Build an annotated token.
pub fn tok(surface: &str, lemma: &str, pos: PosTag, dep: DepLabel, head: usize) -> Token {
    Token {
        surface: surface.to_string(),
        lemma: lemma.to_string(),
        pos,
        dep,
        head,
    }
}

/// Build a token sequence from hand-annotated tokens.
pub fn seq(tokens: Vec<Token>) -> TokenSequence {
    TokenSequence::new(tokens)
}

/// Naive fallback annotation: whitespace tokens, identity lemma
/// (lower-cased), noun tag, every token its own root.
pub fn naive(text: &str) -> TokenSequence {
    let tokens = text
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| Token {
            surface: word.to_string(),
            lemma: word.to_lowercase(),
            pos: PosTag::Noun,
            dep: DepLabel::Root,
            head: index,
        })
        .collect();
    TokenSequence::new(tokens)
}

/// A [`LanguagePipeline`] answering from registered fixtures.
#[derive(Debug, Default)]
pub struct FixturePipeline {
    docs: HashMap<String, TokenSequence>,
}

impl FixturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the parse for an exact input text.
    pub fn with(mut self, text: impl Into<String>, parsed: TokenSequence) -> Self {
        self.docs.insert(text.into(), parsed);
        self
    }
}

#[async_trait]
impl LanguagePipeline for FixturePipeline {
    async fn parse(&self, text: &str) -> Result<TokenSequence, PipelineError> {
        Ok(self
            .docs
            .get(text)
            .cloned()
            .unwrap_or_else(|| naive(text)))
    }
}
