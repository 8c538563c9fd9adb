//! The provider-driven strategy.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use qualia_nlp::LanguagePipeline;
use qualia_patterns::ExtractError;
use qualia_search::SearchProvider;

use crate::element::QualiaElement;
use crate::error::GenerationError;
use crate::inflect::{EnglishInflector, InflectionOverrides, Inflector, singular_and_plural};
use crate::metric::{Metric, apply_occurrence_metric, apply_web_metric};
use crate::strategy::CreationStrategy;
use crate::structure::DebugQualiaStructure;
use crate::validate::{DEFAULT_BLACKLIST, clean_snippet, is_valid_candidate, normalize_candidate};

/// Generates a structure from web-search evidence.
///
/// Per pattern: the rendered query goes out as an exact-phrase search, each
/// returned snippet is cleaned and run through the pattern's extraction
/// rule, valid candidates are aggregated with their provenance, and once
/// all roles are populated the configured metric scores and orders them.
pub struct SearchStrategy {
    pipeline: Arc<dyn LanguagePipeline>,
    provider: Arc<dyn SearchProvider>,
    metric: Metric,
    overrides: InflectionOverrides,
    inflector: Arc<dyn Inflector>,
    blacklist: Vec<String>,
}

impl SearchStrategy {
    pub fn new(
        pipeline: Arc<dyn LanguagePipeline>,
        provider: Arc<dyn SearchProvider>,
        metric: Metric,
        overrides: InflectionOverrides,
    ) -> Self {
        Self {
            pipeline,
            provider,
            metric,
            overrides,
            inflector: Arc::new(EnglishInflector),
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    pub fn with_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.blacklist = blacklist;
        self
    }
}

#[async_trait]
impl CreationStrategy for SearchStrategy {
    async fn generate(&self, subject: &str) -> Result<DebugQualiaStructure, GenerationError> {
        let (singular, plural) = singular_and_plural(
            self.pipeline.as_ref(),
            &self.overrides,
            self.inflector.as_ref(),
            subject,
        )
        .await?;

        let mut structure = DebugQualiaStructure::new(subject);

        for role in structure.roles_mut() {
            let role_name = role.name();
            for slot in role.slots_mut() {
                let form = if slot.sequence.uses_plural() {
                    plural.as_str()
                } else {
                    singular.as_str()
                };
                let query = format!("\"{}\"", slot.sequence.search_query(form));
                let snippets = self.provider.query_text(&query).await?;
                tracing::debug!(
                    role = %role_name,
                    pattern = slot.sequence.name(),
                    snippets = snippets.len(),
                    "evidence fetched"
                );

                let mut collected: IndexMap<String, Vec<String>> = IndexMap::new();
                for snippet in snippets {
                    let cleaned = clean_snippet(&snippet);
                    match slot
                        .sequence
                        .extract(self.pipeline.as_ref(), form, &cleaned)
                        .await
                    {
                        Ok(groups) => {
                            for group in groups {
                                let candidate = normalize_candidate(&group);
                                if is_valid_candidate(subject, &candidate, &self.blacklist) {
                                    collected.entry(candidate).or_default().push(cleaned.clone());
                                }
                            }
                        }
                        Err(ExtractError::NotFound(_)) => slot.unresolved.push(cleaned),
                        Err(ExtractError::Trigger(error)) => {
                            return Err(GenerationError::Trigger(error.to_string()));
                        }
                        Err(ExtractError::Pipeline(error)) => return Err(error.into()),
                    }
                }

                slot.elements = collected
                    .into_iter()
                    .map(|(word, sources)| QualiaElement::with_sources(word, sources))
                    .collect();
            }
        }

        if self.metric.is_web_based() {
            apply_web_metric(self.metric, &mut structure, self.provider.as_ref()).await?;
        } else {
            apply_occurrence_metric(self.metric, &mut structure);
        }

        Ok(structure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use qualia_nlp::helpers::{FixturePipeline, seq, tok};
    use qualia_nlp::{DepLabel, PosTag, TokenSequence};
    use qualia_search::SearchError;

    use crate::role::RoleName;

    const NOUN: PosTag = PosTag::Noun;
    const AUX: PosTag = PosTag::Aux;
    const DET: PosTag = PosTag::Det;
    const ADJ: PosTag = PosTag::Adj;
    const PUNCT: PosTag = PosTag::Punct;

    /// Answers a fixed set of queries with snippets; everything else is
    /// empty. Counts are served from a map.
    struct StubProvider {
        snippets: HashMap<String, Vec<String>>,
        counts: HashMap<String, u64>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                snippets: HashMap::new(),
                counts: HashMap::new(),
            }
        }

        fn with_snippets(mut self, query: &str, snippets: &[&str]) -> Self {
            self.snippets.insert(
                query.to_string(),
                snippets.iter().map(|s| s.to_string()).collect(),
            );
            self
        }
    }

    #[async_trait]
    impl SearchProvider for StubProvider {
        async fn query_text(&self, query: &str) -> Result<Vec<String>, SearchError> {
            Ok(self.snippets.get(query).cloned().unwrap_or_default())
        }

        async fn count_solo(&self, term: &str) -> Result<u64, SearchError> {
            Ok(self.counts.get(term).copied().unwrap_or(0))
        }

        async fn count_near(&self, a: &str, b: &str) -> Result<u64, SearchError> {
            Ok(self
                .counts
                .get(&format!("{a} AROUND(10) {b}"))
                .copied()
                .unwrap_or(0))
        }

        async fn count_both(&self, a: &str, b: &str) -> Result<u64, SearchError> {
            Ok(self.counts.get(&format!("{a} {b}")).copied().unwrap_or(0))
        }
    }

    struct ExhaustedProvider;

    #[async_trait]
    impl SearchProvider for ExhaustedProvider {
        async fn query_text(&self, _query: &str) -> Result<Vec<String>, SearchError> {
            Err(SearchError::QuotaExhausted)
        }
        async fn count_solo(&self, _term: &str) -> Result<u64, SearchError> {
            Err(SearchError::QuotaExhausted)
        }
        async fn count_near(&self, _a: &str, _b: &str) -> Result<u64, SearchError> {
            Err(SearchError::QuotaExhausted)
        }
        async fn count_both(&self, _a: &str, _b: &str) -> Result<u64, SearchError> {
            Err(SearchError::QuotaExhausted)
        }
    }

    fn dog_is_a_parse() -> TokenSequence {
        seq(vec![
            tok("Dog", "dog", NOUN, DepLabel::Nsubj, 4),
            tok("is", "be", AUX, DepLabel::Cop, 4),
            tok("a", "a", DET, DepLabel::Det, 4),
            tok("nice", "nice", ADJ, DepLabel::Amod, 4),
            tok("animal", "animal", NOUN, DepLabel::Root, 4),
            tok(".", ".", PUNCT, DepLabel::Punct, 4),
            tok("Dog", "dog", NOUN, DepLabel::Nsubj, 10),
            tok("is", "be", AUX, DepLabel::Cop, 10),
            tok("a", "a", DET, DepLabel::Det, 10),
            tok("good", "good", ADJ, DepLabel::Amod, 10),
            tok("friend", "friend", NOUN, DepLabel::Root, 10),
            tok(".", ".", PUNCT, DepLabel::Punct, 10),
        ])
    }

    fn strategy(pipeline: FixturePipeline, provider: StubProvider) -> SearchStrategy {
        SearchStrategy::new(
            Arc::new(pipeline),
            Arc::new(provider),
            Metric::NumberOfSources,
            InflectionOverrides::new(),
        )
    }

    #[tokio::test]
    async fn collects_is_a_candidates_with_provenance() -> anyhow::Result<()> {
        let evidence = "Dog is a nice animal. Dog is a good friend.";
        let pipeline = FixturePipeline::new().with(evidence, dog_is_a_parse());
        let provider = StubProvider::new().with_snippets("\"a|an dog is a\"", &[evidence]);

        let structure = strategy(pipeline, provider).generate("dog").await?;

        let formal = structure.role(RoleName::Formal);
        let is_a = formal
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "is-a")
            .unwrap();
        let words: Vec<_> = is_a.elements.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["animal", "friend"]);
        assert_eq!(is_a.elements[0].sources, vec![evidence.to_string()]);
        // One snippet each under the number-of-sources metric.
        assert_eq!(is_a.elements[0].score, 1.0);
        Ok(())
    }

    #[tokio::test]
    async fn collects_made_of_candidates() -> anyhow::Result<()> {
        let evidence = "PC is made of golden banana. Additional PC is made of metal";
        let parse = seq(vec![
            tok("PC", "pc", NOUN, DepLabel::Nsubjpass, 2),
            tok("is", "be", AUX, DepLabel::Auxpass, 2),
            tok("made", "make", PosTag::Verb, DepLabel::Root, 2),
            tok("of", "of", PosTag::Adp, DepLabel::Case, 5),
            tok("golden", "golden", ADJ, DepLabel::Amod, 5),
            tok("banana", "banana", NOUN, DepLabel::Nmod, 2),
            tok(".", ".", PUNCT, DepLabel::Punct, 2),
            tok("Additional", "additional", ADJ, DepLabel::Amod, 8),
            tok("PC", "pc", NOUN, DepLabel::Nsubjpass, 10),
            tok("is", "be", AUX, DepLabel::Auxpass, 10),
            tok("made", "make", PosTag::Verb, DepLabel::Root, 10),
            tok("of", "of", PosTag::Adp, DepLabel::Case, 12),
            tok("metal", "metal", NOUN, DepLabel::Nmod, 10),
        ]);
        let pipeline = FixturePipeline::new().with(evidence, parse);
        let provider = StubProvider::new().with_snippets("\"a|an pc is made of\"", &[evidence]);

        let structure = strategy(pipeline, provider).generate("pc").await?;

        let constitutive = structure.role(RoleName::Constitutive);
        let made_of = constitutive
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "made-of")
            .unwrap();
        let words: Vec<_> = made_of.elements.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["banana", "metal"]);
        Ok(())
    }

    #[tokio::test]
    async fn extraction_miss_lands_in_unresolved() -> anyhow::Result<()> {
        let evidence = "A bicycle is kind of funny.";
        let parse = seq(vec![
            tok("A", "a", DET, DepLabel::Det, 1),
            tok("bicycle", "bicycle", NOUN, DepLabel::Nsubj, 5),
            tok("is", "be", AUX, DepLabel::Cop, 5),
            tok("kind", "kind", NOUN, DepLabel::Advmod, 5),
            tok("of", "of", PosTag::Adp, DepLabel::Case, 3),
            tok("funny", "funny", ADJ, DepLabel::Root, 5),
            tok(".", ".", PUNCT, DepLabel::Punct, 5),
        ]);
        let pipeline = FixturePipeline::new().with(evidence, parse);
        let provider =
            StubProvider::new().with_snippets("\"a|an bicycle is kind of\"", &[evidence]);

        let structure = strategy(pipeline, provider).generate("bicycle").await?;

        let formal = structure.role(RoleName::Formal);
        let kind_of = formal
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "kind-of")
            .unwrap();
        assert!(kind_of.elements.is_empty());
        assert_eq!(kind_of.unresolved, vec![evidence.to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn candidates_echoing_the_subject_are_dropped() -> anyhow::Result<()> {
        // "Dog is a dog." extracts "dog", which validation rejects.
        let evidence = "Dog is a dog.";
        let parse = seq(vec![
            tok("Dog", "dog", NOUN, DepLabel::Nsubj, 3),
            tok("is", "be", AUX, DepLabel::Cop, 3),
            tok("a", "a", DET, DepLabel::Det, 3),
            tok("dog", "dog", NOUN, DepLabel::Root, 3),
            tok(".", ".", PUNCT, DepLabel::Punct, 3),
        ]);
        let pipeline = FixturePipeline::new().with(evidence, parse);
        let provider = StubProvider::new().with_snippets("\"a|an dog is a\"", &[evidence]);

        let structure = strategy(pipeline, provider).generate("dog").await?;

        let formal = structure.role(RoleName::Formal);
        let is_a = formal
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "is-a")
            .unwrap();
        assert!(is_a.elements.is_empty());
        // Dropped, not unresolved: extraction itself succeeded.
        assert!(is_a.unresolved.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn quota_exhaustion_fails_the_word() {
        let strategy = SearchStrategy::new(
            Arc::new(FixturePipeline::new()),
            Arc::new(ExhaustedProvider),
            Metric::NumberOfSources,
            InflectionOverrides::new(),
        );
        let result = strategy.generate("dog").await;
        assert!(matches!(
            result,
            Err(GenerationError::Search(SearchError::QuotaExhausted))
        ));
    }
}
