//! The predictor-driven strategy.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;

use qualia_nlp::{LanguagePipeline, is_stop_word};
use qualia_patterns::{ExtractError, SemanticSequence};
use qualia_predict::{MaskPredictor, Prediction, fill_all_blanks, predict_all};

use crate::element::QualiaElement;
use crate::error::GenerationError;
use crate::inflect::{EnglishInflector, InflectionOverrides, Inflector, singular_and_plural};
use crate::strategy::CreationStrategy;
use crate::structure::DebugQualiaStructure;
use crate::validate::DEFAULT_BLACKLIST;

/// Generates a structure from mask-predictor fills.
///
/// Per pattern, every prompt template is rendered and predicted; valid
/// fills become candidates scored by the model's probability, with
/// duplicates across prompts merged by taking the *maximum* probability
/// observed (monotonic confidence, not frequency). Invalid fills land in
/// the pattern's unresolved bucket. No separate metric pass runs.
///
/// In verified mode each fill is additionally substituted back into its
/// prompt and the pattern's extraction rule re-run against the filled
/// sentence; the fill is accepted only when extraction yields exactly the
/// predicted tokens, closing the loop between generation and structural
/// verification.
pub struct PredictorStrategy {
    pipeline: Arc<dyn LanguagePipeline>,
    predictor: Arc<dyn MaskPredictor>,
    overrides: InflectionOverrides,
    inflector: Arc<dyn Inflector>,
    blacklist: Vec<String>,
    verified: bool,
}

impl PredictorStrategy {
    pub fn new(
        pipeline: Arc<dyn LanguagePipeline>,
        predictor: Arc<dyn MaskPredictor>,
        overrides: InflectionOverrides,
    ) -> Self {
        Self {
            pipeline,
            predictor,
            overrides,
            inflector: Arc::new(EnglishInflector),
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
            verified: false,
        }
    }

    /// Enable structural verification of every fill.
    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }

    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    async fn accept(
        &self,
        sequence: &SemanticSequence,
        form: &str,
        prediction: &Prediction,
        prompt: &str,
    ) -> Result<bool, GenerationError> {
        if !base_valid(form, &prediction.fill, &self.blacklist) {
            return Ok(false);
        }
        if !self.verified {
            return Ok(true);
        }

        let filled = fill_all_blanks(prompt, &prediction.fill);
        match sequence
            .extract(self.pipeline.as_ref(), form, &filled)
            .await
        {
            Ok(groups) => {
                let extracted: Option<Vec<String>> = groups.first().map(|group| {
                    group
                        .iter()
                        .map(|token| token.surface.trim().to_string())
                        .collect()
                });
                Ok(extracted.as_deref() == Some(&prediction.fill))
            }
            Err(ExtractError::NotFound(_)) => Ok(false),
            Err(ExtractError::Trigger(error)) => Err(GenerationError::Trigger(error.to_string())),
            Err(ExtractError::Pipeline(error)) => Err(error.into()),
        }
    }

    async fn lemmatize(&self, text: &str) -> Result<String, GenerationError> {
        let parsed = self.pipeline.parse(text).await?;
        Ok(parsed
            .iter()
            .map(|token| token.lemma.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase())
    }
}

#[async_trait]
impl CreationStrategy for PredictorStrategy {
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

                // word → (best probability, prompts it appeared in)
                let mut merged: IndexMap<String, (f64, Vec<String>)> = IndexMap::new();

                for prompt in slot.sequence.prompt_inputs(form) {
                    let predictions = predict_all(self.predictor.as_ref(), &prompt).await?;
                    tracing::debug!(
                        role = %role_name,
                        pattern = slot.sequence.name(),
                        predictions = predictions.len(),
                        "prompt predicted"
                    );
                    for prediction in predictions {
                        let filled = fill_all_blanks(&prompt, &prediction.fill);
                        if self
                            .accept(&slot.sequence, form, &prediction, &prompt)
                            .await?
                        {
                            let cleaned = clean_prediction(&prediction.fill);
                            let word = self.lemmatize(&cleaned).await?;
                            let entry = merged.entry(word).or_insert((0.0, Vec::new()));
                            entry.0 = entry.0.max(prediction.probability);
                            entry.1.push(filled);
                        } else {
                            slot.unresolved.push(filled);
                        }
                    }
                }

                slot.elements = merged
                    .into_iter()
                    .map(|(word, (probability, sources))| {
                        QualiaElement::with_sources(word, sources).with_score(probability)
                    })
                    .collect();
            }
        }

        Ok(structure)
    }
}

/// Join the fill words and strip punctuation, the shape candidates are
/// validated and lemmatized in.
fn clean_prediction(fill: &[String]) -> String {
    fill.join(" ")
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect::<String>()
        .trim()
        .to_string()
}

fn base_valid(form: &str, fill: &[String], blacklist: &[String]) -> bool {
    let cleaned = clean_prediction(fill);
    !fill.iter().any(|word| word == form)
        && cleaned.len() > 1
        && cleaned != form
        && !blacklist.iter().any(|entry| *entry == cleaned)
        && !cleaned.chars().any(|c| c.is_ascii_digit())
        && !fill.iter().any(|word| is_stop_word(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use qualia_nlp::helpers::{FixturePipeline, seq, tok};
    use qualia_nlp::{DepLabel, PosTag};
    use qualia_predict::PredictError;

    use crate::role::RoleName;

    /// Serves scripted predictions per exact prompt; unknown prompts
    /// predict nothing.
    struct ScriptedPredictor {
        answers: HashMap<String, Vec<Prediction>>,
    }

    impl ScriptedPredictor {
        fn new() -> Self {
            Self {
                answers: HashMap::new(),
            }
        }

        fn with(mut self, prompt: &str, answers: &[(&str, f64)]) -> Self {
            self.answers.insert(
                prompt.to_string(),
                answers
                    .iter()
                    .map(|(word, probability)| Prediction::new(*word, *probability))
                    .collect(),
            );
            self
        }
    }

    #[async_trait]
    impl MaskPredictor for ScriptedPredictor {
        async fn predict(&self, prompt: &str) -> Result<Vec<Prediction>, PredictError> {
            Ok(self.answers.get(prompt).cloned().unwrap_or_default())
        }
    }

    fn used_to_slot_words(structure: &DebugQualiaStructure) -> Vec<(String, f64)> {
        structure
            .role(RoleName::Telic)
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "is-used-to")
            .unwrap()
            .elements
            .iter()
            .map(|e| (e.word.clone(), e.score))
            .collect()
    }

    #[tokio::test]
    async fn duplicate_fills_merge_by_maximum_probability() -> anyhow::Result<()> {
        // The same fill shows up under two of the pattern's prompts with
        // different probabilities; the merged score is the maximum.
        let predictor = ScriptedPredictor::new()
            .with("a dog is used to [BLANK]", &[("sleep", 0.2)])
            .with("a dog is used to be [BLANK]", &[("sleep", 0.7)]);
        let strategy = PredictorStrategy::new(
            Arc::new(FixturePipeline::new()),
            Arc::new(predictor),
            InflectionOverrides::new(),
        );

        let structure = strategy.generate("dog").await?;
        let words = used_to_slot_words(&structure);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].0, "sleep");
        assert!((words[0].1 - 0.7).abs() < 1e-9);

        // Both prompts contribute provenance.
        let slot_sources = &structure
            .role(RoleName::Telic)
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "is-used-to")
            .unwrap()
            .elements[0]
            .sources;
        assert_eq!(slot_sources.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn stop_words_and_subject_echoes_are_unresolved() -> anyhow::Result<()> {
        let predictor = ScriptedPredictor::new().with(
            "a dog is used to [BLANK]",
            &[("the", 0.5), ("dog", 0.3), ("sleep", 0.2)],
        );
        let strategy = PredictorStrategy::new(
            Arc::new(FixturePipeline::new()),
            Arc::new(predictor),
            InflectionOverrides::new(),
        );

        let structure = strategy.generate("dog").await?;
        let slot = structure
            .role(RoleName::Telic)
            .slots()
            .iter()
            .find(|slot| slot.sequence.name() == "is-used-to")
            .unwrap()
            .clone();
        let words: Vec<_> = slot.elements.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["sleep"]);
        assert_eq!(
            slot.unresolved,
            vec![
                "a dog is used to the".to_string(),
                "a dog is used to dog".to_string(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn verified_mode_requires_extraction_to_reproduce_the_fill() -> anyhow::Result<()> {
        // "sleep" parses as the xcomp of "used" and is reproduced by the
        // extraction rule; "fly" gets the naive fallback parse, where the
        // rule finds nothing.
        let verified_parse = seq(vec![
            tok("a", "a", PosTag::Det, DepLabel::Det, 1),
            tok("dog", "dog", PosTag::Noun, DepLabel::Nsubjpass, 3),
            tok("is", "be", PosTag::Aux, DepLabel::Auxpass, 3),
            tok("used", "use", PosTag::Verb, DepLabel::Root, 3),
            tok("to", "to", PosTag::Part, DepLabel::Mark, 5),
            tok("sleep", "sleep", PosTag::Verb, DepLabel::Xcomp, 3),
        ]);
        let pipeline = FixturePipeline::new().with("a dog is used to sleep", verified_parse);
        let predictor = ScriptedPredictor::new().with(
            "a dog is used to [BLANK]",
            &[("sleep", 0.6), ("fly", 0.4)],
        );
        let strategy = PredictorStrategy::new(
            Arc::new(pipeline),
            Arc::new(predictor),
            InflectionOverrides::new(),
        )
        .verified();

        let structure = strategy.generate("dog").await?;
        let words = used_to_slot_words(&structure);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].0, "sleep");
        Ok(())
    }

    #[test]
    fn prediction_cleanup_strips_punctuation() {
        assert_eq!(
            clean_prediction(&["well".to_string(), "-known!".to_string()]),
            "well known"
        );
    }
}
