//! Candidate validation and normalization, and snippet clean-up.

use qualia_nlp::Token;

/// Surface noise that survives extraction but carries no meaning.
pub const DEFAULT_BLACKLIST: &[&str] = &["xyz"];

/// Whether an extracted, normalized candidate is worth keeping.
///
/// Rejects the subject word itself, single characters, blacklist entries,
/// and anything containing punctuation or digits. Invalid candidates are
/// dropped entirely; they do not land in the unresolved bucket.
pub fn is_valid_candidate(subject: &str, candidate: &str, blacklist: &[String]) -> bool {
    candidate != subject
        && candidate.len() > 1
        && !blacklist.iter().any(|entry| entry == candidate)
        && !candidate
            .chars()
            .any(|c| c.is_ascii_punctuation() || c.is_ascii_digit())
}

/// Normalize an extracted token group: lemmas joined by single spaces,
/// lower-cased.
pub fn normalize_candidate(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.lemma.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Strip search-result artifacts from a snippet: ellipsis markers become
/// sentence boundaries, newlines disappear.
pub fn clean_snippet(snippet: &str) -> String {
    let mut cleaned = snippet;
    if let Some(stripped) = cleaned.strip_suffix("...") {
        cleaned = stripped;
    }
    if let Some(stripped) = cleaned.strip_prefix("...") {
        cleaned = stripped;
    }
    cleaned
        .replace('\n', "")
        .replace("... ...", ".")
        .replace("...", ".")
}
