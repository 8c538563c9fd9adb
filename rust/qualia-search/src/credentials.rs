//! Credential loading and quota-driven rotation.
//!
//! Credentials are `(API key, search engine id)` pairs read from a plain
//! text file, one pair per whitespace-separated line; `#` starts a comment.
//! The ring hands out the current pair until the provider reports a quota
//! hit, then advances. Falling off the end is the terminal
//! [`SearchError::QuotaExhausted`] condition.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::SearchError;

/// One API credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub api_key: String,
    pub engine_id: String,
}

/// Load credential pairs from a text file.
pub fn read_key_file(path: &Path) -> Result<Vec<Credential>, SearchError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|error| SearchError::Credentials(format!("{}: {error}", path.display())))?;
    let credentials = parse_key_file(&contents)?;
    if credentials.is_empty() {
        return Err(SearchError::Credentials(format!(
            "{} does not contain credentials",
            path.display()
        )));
    }
    Ok(credentials)
}

fn parse_key_file(contents: &str) -> Result<Vec<Credential>, SearchError> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some(api_key), Some(engine_id)) => Ok(Credential {
                    api_key: api_key.to_string(),
                    engine_id: engine_id.to_string(),
                }),
                _ => Err(SearchError::Credentials(format!(
                    "expected `<api key> <engine id>`, got {line:?}"
                ))),
            }
        })
        .collect()
}

/// Rotates through credentials as their quotas are spent.
#[derive(Debug)]
pub struct CredentialRing {
    credentials: Vec<Credential>,
    index: AtomicUsize,
}

impl CredentialRing {
    pub fn new(credentials: Vec<Credential>) -> Result<Self, SearchError> {
        if credentials.is_empty() {
            return Err(SearchError::Credentials(
                "at least one credential is required".to_string(),
            ));
        }
        Ok(Self {
            credentials,
            index: AtomicUsize::new(0),
        })
    }

    /// The credential to use for the next request.
    pub fn current(&self) -> Result<&Credential, SearchError> {
        self.credentials
            .get(self.index.load(Ordering::Relaxed))
            .ok_or(SearchError::QuotaExhausted)
    }

    /// Retire the current credential after a quota hit.
    ///
    /// Returns the next credential, or [`SearchError::QuotaExhausted`] when
    /// none remain.
    pub fn advance(&self) -> Result<&Credential, SearchError> {
        let next = self.index.fetch_add(1, Ordering::Relaxed) + 1;
        self.credentials
            .get(next)
            .ok_or(SearchError::QuotaExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_skips_comments() {
        let parsed = parse_key_file("# comment\nkeyA engineA\n\nkeyB engineB\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].api_key, "keyA");
        assert_eq!(parsed[1].engine_id, "engineB");
    }

    #[test]
    fn incomplete_line_is_an_error() {
        assert!(matches!(
            parse_key_file("lonely-key\n"),
            Err(SearchError::Credentials(_))
        ));
    }

    #[test]
    fn empty_ring_is_rejected() {
        assert!(matches!(
            CredentialRing::new(vec![]),
            Err(SearchError::Credentials(_))
        ));
    }

    #[test]
    fn ring_advances_until_exhausted() {
        let ring = CredentialRing::new(
            parse_key_file("keyA engineA\nkeyB engineB\n").unwrap(),
        )
        .unwrap();

        assert_eq!(ring.current().unwrap().api_key, "keyA");
        assert_eq!(ring.advance().unwrap().api_key, "keyB");
        assert_eq!(ring.advance(), Err(SearchError::QuotaExhausted));
        assert_eq!(ring.current(), Err(SearchError::QuotaExhausted));
    }
}
