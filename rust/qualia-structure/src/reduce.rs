//! Reduction of the working structure into the published structure.

use std::collections::HashSet;

use chrono::Local;

use crate::structure::{DebugQualiaStructure, QualiaStructure};

/// Timestamp format of the published structure.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Reduce a working structure to the published top-K view, stamped with
/// the current local time.
pub fn debug_to_public(debug: &DebugQualiaStructure, top_k: usize) -> QualiaStructure {
    debug_to_public_at(
        debug,
        top_k,
        Local::now().format(TIMESTAMP_FORMAT).to_string(),
    )
}

/// Reduce with an explicit creation timestamp.
///
/// Per role: concatenate the patterns' candidate lists in catalogue order,
/// stable-sort by score descending, deduplicate keeping the first (and
/// therefore highest-scored) occurrence of each candidate, truncate to
/// `top_k`, and project to bare strings. Everything here is
/// deterministic: re-running on the same input yields the same output.
pub fn debug_to_public_at(
    debug: &DebugQualiaStructure,
    top_k: usize,
    created_at: String,
) -> QualiaStructure {
    let mut public = QualiaStructure::new(debug.subject(), created_at);

    for role in debug.roles() {
        let mut merged: Vec<_> = role.elements().collect();
        merged.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut seen = HashSet::new();
        let words: Vec<String> = merged
            .into_iter()
            .filter(|element| seen.insert(element.word.as_str()))
            .take(top_k)
            .map(|element| element.word.clone())
            .collect();

        public.roles.insert(role.name().to_string(), words);
    }

    public
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::element::QualiaElement;
    use crate::role::RoleName;

    fn sample_structure() -> DebugQualiaStructure {
        let mut debug = DebugQualiaStructure::new("dog");
        let formal = debug.role_mut(RoleName::Formal);
        formal.slots_mut()[0].elements = vec![
            QualiaElement::new("animal").with_score(3.0),
            QualiaElement::new("friend").with_score(1.0),
        ];
        formal.slots_mut()[1].elements = vec![
            QualiaElement::new("friend").with_score(2.0),
            QualiaElement::new("pet").with_score(2.0),
        ];
        debug
    }

    fn formal_words(public: &QualiaStructure) -> Vec<String> {
        public.roles.get("formal").cloned().unwrap_or_default()
    }

    #[test]
    fn merges_sorts_and_deduplicates() {
        let public = debug_to_public_at(&sample_structure(), 8, "now".into());
        // friend appears twice; its first (highest-scored) occurrence wins.
        assert_eq!(formal_words(&public), vec!["animal", "friend", "pet"]);
    }

    #[test]
    fn reduction_is_idempotent() {
        let debug = sample_structure();
        let first = debug_to_public_at(&debug, 8, "now".into());
        let second = debug_to_public_at(&debug, 8, "now".into());
        assert_eq!(first.roles, second.roles);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let mut debug = DebugQualiaStructure::new("dog");
        let formal = debug.role_mut(RoleName::Formal);
        formal.slots_mut()[0].elements = vec![
            QualiaElement::new("animal").with_score(1.0),
            QualiaElement::new("friend").with_score(1.0),
            QualiaElement::new("pet").with_score(1.0),
        ];
        let public = debug_to_public_at(&debug, 8, "now".into());
        assert_eq!(formal_words(&public), vec!["animal", "friend", "pet"]);
    }

    #[test]
    fn top_k_truncates_after_deduplication() {
        let public = debug_to_public_at(&sample_structure(), 2, "now".into());
        assert_eq!(formal_words(&public), vec!["animal", "friend"]);
    }

    #[test]
    fn top_k_zero_is_empty() {
        let public = debug_to_public_at(&sample_structure(), 0, "now".into());
        assert!(formal_words(&public).is_empty());
    }

    #[test]
    fn top_k_beyond_distinct_count_keeps_everything() {
        let public = debug_to_public_at(&sample_structure(), 100, "now".into());
        assert_eq!(formal_words(&public).len(), 3);
    }

    #[test]
    fn untouched_roles_reduce_to_empty_lists() {
        let public = debug_to_public_at(&sample_structure(), 8, "now".into());
        assert!(public.roles.get("telic").unwrap().is_empty());
    }
}
