//! The provider trait.

use async_trait::async_trait;

use crate::error::SearchError;

/// A textual web-search service.
///
/// `query_text` feeds evidence extraction; the three count operations feed
/// the web-co-occurrence metrics. All operations surface
/// [`SearchError::QuotaExhausted`] once every credential is spent.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Text snippets returned for `query`, in result order.
    async fn query_text(&self, query: &str) -> Result<Vec<String>, SearchError>;

    /// Number of results for `term` on its own.
    async fn count_solo(&self, term: &str) -> Result<u64, SearchError>;

    /// Number of results where `term_a` occurs near `term_b`.
    async fn count_near(&self, term_a: &str, term_b: &str) -> Result<u64, SearchError>;

    /// Number of results containing both `term_a` and `term_b`.
    async fn count_both(&self, term_a: &str, term_b: &str) -> Result<u64, SearchError>;
}
