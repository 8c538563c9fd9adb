//! The semantic sequence type: one declared linguistic construct.

use qualia_nlp::{LanguagePipeline, Token};
use serde::{Serialize, Serializer};

use crate::error::ExtractError;
use crate::rule::ExtractionRule;
use crate::trigger::locate_spans;

/// The blank marker in predictor prompts.
pub const BLANK: &str = "[BLANK]";

/// Placeholder substituted by the subject word in templates.
const WORD: &str = "{word}";

/// Article alternation resolved at prompt-rendering time; provider queries
/// keep it literally.
const ARTICLE: &str = "a|an";

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Grammatical number of the subject-word form a sequence is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Number {
    Singular,
    Plural,
}

/// A declared pattern: trigger expression, provider query, prompt
/// templates, and tree-extraction rule for one linguistic construct.
///
/// Sequences are stateless values, reusable across subject words. Surface
/// variants of the same relation (singular vs. plural, "made of" vs. "made
/// up of") are separate catalogue entries.
#[derive(Debug, Clone)]
pub struct SemanticSequence {
    name: &'static str,
    number: Number,
    trigger: &'static str,
    query: &'static str,
    prompts: &'static [&'static str],
    rule: ExtractionRule,
}

impl SemanticSequence {
    pub fn new(
        name: &'static str,
        number: Number,
        trigger: &'static str,
        query: &'static str,
        prompts: &'static [&'static str],
        rule: ExtractionRule,
    ) -> Self {
        Self {
            name,
            number,
            trigger,
            query,
            prompts,
            rule,
        }
    }

    /// Stable identifier, unique within a role's catalogue.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn number(&self) -> Number {
        self.number
    }

    /// Whether generation substitutes the plural form of the subject word.
    pub fn uses_plural(&self) -> bool {
        self.number == Number::Plural
    }

    pub fn rule(&self) -> &ExtractionRule {
        &self.rule
    }

    /// The trigger expression with the subject word substituted.
    ///
    /// The subject is regex-escaped; the expression is lower-cased at match
    /// time, not here.
    pub fn trigger_expression(&self, subject: &str) -> String {
        self.trigger.replace(WORD, &regex::escape(subject))
    }

    /// The one-line provider query with the subject word substituted.
    pub fn search_query(&self, subject: &str) -> String {
        self.query.replace(WORD, subject)
    }

    /// Rendered predictor prompts: subject substituted, `a|an` resolved by
    /// the subject's initial, and the blank marker appended when a template
    /// carries none. Defaults to a single prompt derived from the provider
    /// query.
    pub fn prompt_inputs(&self, subject: &str) -> Vec<String> {
        if self.prompts.is_empty() {
            vec![render_prompt(self.query, subject)]
        } else {
            self.prompts
                .iter()
                .map(|template| render_prompt(template, subject))
                .collect()
        }
    }

    /// Extract candidate token groups for `subject` from `evidence`.
    ///
    /// Parses the evidence, locates trigger spans over the joined token
    /// surface, discards spans whose end index is not strictly inside the
    /// sequence, and applies the extraction rule to each remaining span.
    /// One group per successful span, in match order. A rule miss on any
    /// span fails the whole evidence item with
    /// [`ExtractError::NotFound`].
    pub async fn extract(
        &self,
        pipeline: &dyn LanguagePipeline,
        subject: &str,
        evidence: &str,
    ) -> Result<Vec<Vec<Token>>, ExtractError> {
        let parsed = pipeline.parse(evidence).await?;
        let joined = parsed.joined_lower();
        let spans = locate_spans(&self.trigger_expression(subject), &joined)?;

        let mut groups = Vec::new();
        for span in spans {
            if span.end < parsed.len() {
                groups.push(self.rule.apply(&parsed, &span)?);
            }
        }
        Ok(groups)
    }
}

/// Sequences are identified by name.
impl PartialEq for SemanticSequence {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for SemanticSequence {}

impl Serialize for SemanticSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

fn starts_with_vowel(word: &str) -> bool {
    word.chars()
        .next()
        .map(|first| VOWELS.contains(&first.to_ascii_lowercase()))
        .unwrap_or(false)
}

fn render_prompt(template: &str, subject: &str) -> String {
    let article = if starts_with_vowel(subject) { "an" } else { "a" };
    let mut rendered = template.replace(WORD, subject).replace(ARTICLE, article);
    if !rendered.contains(BLANK) {
        rendered.push(' ');
        rendered.push_str(BLANK);
    }
    rendered
}
