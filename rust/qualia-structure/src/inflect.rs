//! Singular/plural inflection of the subject word.
//!
//! Inflection is a collaborator: the [`Inflector`] trait answers from the
//! word's lemma, and an [`InflectionOverrides`] table loaded from a file
//! takes precedence for words the inflector gets wrong. A word that
//! neither covers is a word-level failure.

use std::collections::HashMap;
use std::path::Path;

use qualia_nlp::LanguagePipeline;

use crate::error::GenerationError;

/// Both number forms of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflection {
    pub singular: String,
    pub plural: String,
}

/// Derives number forms from a lemma, or signals "not supported".
pub trait Inflector: Send + Sync {
    fn inflect(&self, lemma: &str) -> Option<Inflection>;
}

/// Rule-based English pluralization.
///
/// Handles the usual suffix rules and a short irregular table. Lemmas
/// containing anything but letters are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

impl Inflector for EnglishInflector {
    fn inflect(&self, lemma: &str) -> Option<Inflection> {
        if lemma.is_empty() || !lemma.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let lower = lemma.to_lowercase();
        let plural = if let Some((_, irregular)) =
            IRREGULAR.iter().find(|(singular, _)| *singular == lower)
        {
            (*irregular).to_string()
        } else if lower.ends_with('s')
            || lower.ends_with('x')
            || lower.ends_with('z')
            || lower.ends_with("ch")
            || lower.ends_with("sh")
        {
            format!("{lower}es")
        } else if lower.ends_with('y')
            && !lower.ends_with("ay")
            && !lower.ends_with("ey")
            && !lower.ends_with("oy")
            && !lower.ends_with("uy")
        {
            format!("{}ies", &lower[..lower.len() - 1])
        } else {
            format!("{lower}s")
        };
        Some(Inflection {
            singular: lower,
            plural,
        })
    }
}

/// Word→plural overrides for words the inflector cannot handle.
#[derive(Debug, Clone, Default)]
pub struct InflectionOverrides {
    entries: HashMap<String, String>,
}

impl InflectionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a text file: one `word plural` pair per line,
    /// `#` starts a comment. A missing file is an empty table.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
            .filter_map(|line| {
                let mut fields = line.split_whitespace();
                Some((fields.next()?.to_string(), fields.next()?.to_string()))
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, word: impl Into<String>, plural: impl Into<String>) {
        self.entries.insert(word.into(), plural.into());
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }
}

/// Resolve both number forms of `word`.
///
/// The override table wins outright: the word itself is taken as the
/// singular and the table entry as the plural. Otherwise the word's lemma
/// (from the pipeline) goes through the inflector; a word neither source
/// can handle fails with [`GenerationError::WordNotSupported`].
pub async fn singular_and_plural(
    pipeline: &dyn LanguagePipeline,
    overrides: &InflectionOverrides,
    inflector: &dyn Inflector,
    word: &str,
) -> Result<(String, String), GenerationError> {
    if let Some(plural) = overrides.get(word) {
        return Ok((word.to_string(), plural.to_string()));
    }

    let parsed = pipeline.parse(word).await?;
    let lemma = parsed
        .get(0)
        .map(|token| token.lemma.clone())
        .ok_or_else(|| GenerationError::WordNotSupported {
            word: word.to_string(),
        })?;

    inflector
        .inflect(&lemma)
        .map(|inflection| (inflection.singular, inflection.plural))
        .ok_or_else(|| GenerationError::WordNotSupported {
            word: word.to_string(),
        })
}
