//! Candidate scoring.
//!
//! Two families, selected once per generation run:
//!
//! - **Occurrence-based** metrics work purely on the in-memory aggregation
//!   and are idempotent: identical structure, identical scores.
//! - **Web-based** metrics estimate co-occurrence strength from three
//!   provider counts (candidate solo, subject solo, near/both) and are
//!   deterministic functions of those counts.
//!
//! Scores are memoized per distinct candidate per role: a candidate that
//! appears under several patterns is computed once and assigned everywhere.

use std::collections::HashMap;

use qualia_search::{SearchError, SearchProvider};

use crate::element::QualiaElement;
use crate::role::Role;
use crate::structure::DebugQualiaStructure;

/// Estimated number of pages in the provider's corpus, used by PMI.
pub const CORPUS_SIZE: f64 = 25_270_000_000.0;

/// The ranking metric of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Total provenance-snippet count across the role's patterns.
    NumberOfSources,
    /// Number of distinct patterns that produced the candidate.
    OccurrenceInPatterns,
    /// ≈ P(candidate | subject): near-count / subject-count.
    WebP,
    /// ≈ near / (candidate + subject − both).
    WebJaccard,
    /// ≈ log2(both × corpus / (candidate × subject)), clamped to 0.
    WebPmi,
}

impl Metric {
    /// Whether scoring needs the search provider.
    pub fn is_web_based(&self) -> bool {
        matches!(self, Metric::WebP | Metric::WebJaccard | Metric::WebPmi)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::NumberOfSources => "number-of-sources",
            Metric::OccurrenceInPatterns => "occurrence-in-patterns",
            Metric::WebP => "web-p",
            Metric::WebJaccard => "web-jaccard",
            Metric::WebPmi => "web-pmi",
        }
    }
}

/// Total provenance-snippet count of `element` across all patterns of its
/// role.
pub fn number_of_sources(role: &Role, element: &QualiaElement) -> f64 {
    role.elements()
        .filter(|candidate| *candidate == element)
        .map(|candidate| candidate.sources.len() as f64)
        .sum()
}

/// Number of distinct patterns of the role that produced `element`.
pub fn occurrence_in_patterns(role: &Role, element: &QualiaElement) -> f64 {
    role.elements()
        .filter(|candidate| *candidate == element)
        .count() as f64
}

/// ≈ P(candidate | subject). Zero when the subject count is zero.
pub fn web_p(near: u64, subject_count: u64) -> f64 {
    if subject_count == 0 {
        return 0.0;
    }
    near as f64 / subject_count as f64
}

/// ≈ Jaccard overlap of the two result sets. Zero when the denominator is
/// not positive.
pub fn web_jaccard(near: u64, candidate_count: u64, subject_count: u64, both: u64) -> f64 {
    let denominator = candidate_count as f64 + subject_count as f64 - both as f64;
    if denominator <= 0.0 {
        return 0.0;
    }
    near as f64 / denominator
}

/// ≈ pointwise mutual information over page counts. Exactly zero when the
/// log argument is zero — never a division or log failure.
pub fn web_pmi(both: u64, candidate_count: u64, subject_count: u64) -> f64 {
    if candidate_count == 0 || subject_count == 0 {
        return 0.0;
    }
    let ratio = both as f64 * CORPUS_SIZE / (candidate_count as f64 * subject_count as f64);
    if ratio == 0.0 { 0.0 } else { ratio.log2() }
}

/// Score every candidate of the structure with an occurrence-based metric
/// and stable-sort each pattern's list by score, descending.
///
/// Web-based metrics must go through [`apply_web_metric`]; passing one
/// here leaves the structure unchanged.
pub fn apply_occurrence_metric(metric: Metric, structure: &mut DebugQualiaStructure) {
    debug_assert!(!metric.is_web_based());
    if metric.is_web_based() {
        return;
    }
    for role in structure.roles_mut() {
        let mut memo: HashMap<String, f64> = HashMap::new();
        for element in role.elements() {
            if !memo.contains_key(&element.word) {
                let score = match metric {
                    Metric::NumberOfSources => number_of_sources(role, element),
                    Metric::OccurrenceInPatterns => occurrence_in_patterns(role, element),
                    _ => 0.0,
                };
                memo.insert(element.word.clone(), score);
            }
        }
        assign_and_sort(role, &memo);
    }
}

/// Score every candidate with a web-based metric and stable-sort each
/// pattern's list by score, descending.
pub async fn apply_web_metric(
    metric: Metric,
    structure: &mut DebugQualiaStructure,
    provider: &dyn SearchProvider,
) -> Result<(), SearchError> {
    debug_assert!(metric.is_web_based());
    let subject = structure.subject().to_string();
    for role in structure.roles_mut() {
        let mut memo: HashMap<String, f64> = HashMap::new();
        for element in role.elements() {
            if memo.contains_key(&element.word) {
                continue;
            }
            let score = web_score(metric, provider, &element.word, &subject).await?;
            memo.insert(element.word.clone(), score);
        }
        assign_and_sort(role, &memo);
    }
    Ok(())
}

async fn web_score(
    metric: Metric,
    provider: &dyn SearchProvider,
    candidate: &str,
    subject: &str,
) -> Result<f64, SearchError> {
    Ok(match metric {
        Metric::WebP => {
            let near = provider.count_near(candidate, subject).await?;
            let subject_count = provider.count_solo(subject).await?;
            web_p(near, subject_count)
        }
        Metric::WebJaccard => {
            let near = provider.count_near(candidate, subject).await?;
            let candidate_count = provider.count_solo(candidate).await?;
            let subject_count = provider.count_solo(subject).await?;
            let both = provider.count_both(candidate, subject).await?;
            web_jaccard(near, candidate_count, subject_count, both)
        }
        Metric::WebPmi => {
            let both = provider.count_both(candidate, subject).await?;
            let candidate_count = provider.count_solo(candidate).await?;
            let subject_count = provider.count_solo(subject).await?;
            web_pmi(both, candidate_count, subject_count)
        }
        _ => 0.0,
    })
}

fn assign_and_sort(role: &mut Role, memo: &HashMap<String, f64>) {
    for slot in role.slots_mut() {
        for element in &mut slot.elements {
            if let Some(score) = memo.get(&element.word) {
                element.score = *score;
            }
        }
        slot.elements.sort_by(|a, b| b.score.total_cmp(&a.score));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleName;

    fn structure_with_formal_elements(slots: &[(usize, Vec<QualiaElement>)]) -> DebugQualiaStructure {
        let mut structure = DebugQualiaStructure::new("computer");
        let role = structure.role_mut(RoleName::Formal);
        for (index, elements) in slots {
            role.slots_mut()[*index].elements = elements.clone();
        }
        structure
    }

    #[test]
    fn number_of_sources_sums_across_patterns() {
        let structure = structure_with_formal_elements(&[
            (
                0,
                vec![QualiaElement::with_sources(
                    "hardware",
                    vec!["s1".into(), "s2".into()],
                )],
            ),
            (
                1,
                vec![QualiaElement::with_sources("hardware", vec!["s3".into()])],
            ),
        ]);
        let role = structure.role(RoleName::Formal);
        let element = QualiaElement::new("hardware");
        assert_eq!(number_of_sources(role, &element), 3.0);
        assert_eq!(occurrence_in_patterns(role, &element), 2.0);
    }

    #[test]
    fn occurrence_metric_assigns_memoized_scores_everywhere() {
        let mut structure = structure_with_formal_elements(&[
            (
                0,
                vec![
                    QualiaElement::with_sources("hardware", vec!["s1".into()]),
                    QualiaElement::with_sources("flesh", vec!["s2".into(), "s3".into()]),
                ],
            ),
            (
                1,
                vec![QualiaElement::with_sources("hardware", vec!["s4".into()])],
            ),
        ]);
        apply_occurrence_metric(Metric::NumberOfSources, &mut structure);

        let role = structure.role(RoleName::Formal);
        // Both occurrences of "hardware" carry the same merged score.
        let scores: Vec<f64> = role
            .elements()
            .filter(|e| e.word == "hardware")
            .map(|e| e.score)
            .collect();
        assert_eq!(scores, vec![2.0, 2.0]);
        // Slot 0 re-sorted: flesh (2 sources) ties hardware (2 sources)
        // and insertion order breaks the tie.
        let first_slot: Vec<_> = role.slots()[0]
            .elements
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(first_slot, vec!["hardware", "flesh"]);
    }

    #[test]
    fn web_p_orders_by_conditional_probability() {
        // Candidates {"hardware": 120, "flesh": 5} against a fixed subject
        // count sort as ["hardware", "flesh"].
        let subject_count = 1_000;
        let hardware = web_p(120, subject_count);
        let flesh = web_p(5, subject_count);
        assert!(hardware > flesh);
    }

    #[tokio::test]
    async fn web_metric_pass_sorts_by_near_counts() -> anyhow::Result<()> {
        use async_trait::async_trait;
        use qualia_search::SearchProvider;

        struct CountProvider;

        #[async_trait]
        impl SearchProvider for CountProvider {
            async fn query_text(&self, _query: &str) -> Result<Vec<String>, SearchError> {
                Ok(Vec::new())
            }
            async fn count_solo(&self, _term: &str) -> Result<u64, SearchError> {
                Ok(1_000)
            }
            async fn count_near(&self, term_a: &str, _b: &str) -> Result<u64, SearchError> {
                Ok(match term_a {
                    "hardware" => 120,
                    "flesh" => 5,
                    _ => 0,
                })
            }
            async fn count_both(&self, _a: &str, _b: &str) -> Result<u64, SearchError> {
                Ok(0)
            }
        }

        let mut structure = structure_with_formal_elements(&[(
            0,
            vec![QualiaElement::new("flesh"), QualiaElement::new("hardware")],
        )]);
        apply_web_metric(Metric::WebP, &mut structure, &CountProvider).await?;

        let words: Vec<_> = structure
            .role(RoleName::Formal)
            .slots()[0]
            .elements
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(words, vec!["hardware", "flesh"]);
        Ok(())
    }

    #[test]
    fn web_p_zero_subject_count_is_zero() {
        assert_eq!(web_p(120, 0), 0.0);
    }

    #[test]
    fn web_jaccard_guards_the_denominator() {
        assert_eq!(web_jaccard(10, 0, 0, 0), 0.0);
        assert!((web_jaccard(10, 100, 100, 50) - 10.0 / 150.0).abs() < 1e-12);
    }

    #[test]
    fn web_pmi_is_zero_when_no_cooccurrence() {
        assert_eq!(web_pmi(0, 100, 100), 0.0);
        assert_eq!(web_pmi(10, 0, 100), 0.0);
    }

    #[test]
    fn web_pmi_is_log2_of_the_ratio() {
        let value = web_pmi(4, 2_000_000, 2_000_000);
        let expected = (4.0 * CORPUS_SIZE / (2_000_000.0 * 2_000_000.0)).log2();
        assert!((value - expected).abs() < 1e-12);
    }
}
