//! Google custom search JSON API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::cache::QueryCache;
use crate::credentials::{Credential, CredentialRing};
use crate::error::SearchError;
use crate::provider::SearchProvider;

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(rename = "searchInformation")]
    search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(rename = "totalResults")]
    total_results: String,
}

fn parse_response(body: &str) -> Result<SearchResponse, SearchError> {
    serde_json::from_str(body).map_err(|error| SearchError::MalformedResponse(error.to_string()))
}

/// A [`SearchProvider`] over the Google custom search JSON API.
///
/// Requests go out with the ring's current credential; a quota answer
/// (HTTP 429 or 403) retires it and retries with the next one. Responses
/// are memoized through the optional [`QueryCache`], keyed by the literal
/// query string, so repeated runs replay from the cache without spending
/// quota.
pub struct GoogleSearchProvider {
    client: reqwest::Client,
    endpoint: String,
    ring: CredentialRing,
    cache: Option<Box<dyn QueryCache>>,
}

impl GoogleSearchProvider {
    pub fn new(client: reqwest::Client, credentials: Vec<Credential>) -> Result<Self, SearchError> {
        Ok(Self {
            client,
            endpoint: ENDPOINT.to_string(),
            ring: CredentialRing::new(credentials)?,
            cache: None,
        })
    }

    /// Attach a response cache.
    pub fn with_cache(mut self, cache: impl QueryCache + 'static) -> Self {
        self.cache = Some(Box::new(cache));
        self
    }

    /// Point the client at a different endpoint (proxies, test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn fetch(&self, query: &str) -> Result<SearchResponse, SearchError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(query).await? {
                return parse_response(&hit);
            }
        }

        loop {
            let credential = self.ring.current()?;
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("key", credential.api_key.as_str()),
                    ("cx", credential.engine_id.as_str()),
                    ("q", query),
                ])
                .send()
                .await
                .map_err(|error| SearchError::Http(error.to_string()))?;

            match response.status() {
                status if status.is_success() => {
                    let body = response
                        .text()
                        .await
                        .map_err(|error| SearchError::Http(error.to_string()))?;
                    if let Some(cache) = &self.cache {
                        cache.put(query, &body).await?;
                    }
                    return parse_response(&body);
                }
                StatusCode::TOO_MANY_REQUESTS | StatusCode::FORBIDDEN => {
                    tracing::warn!(query, "credential hit its quota, rotating");
                    self.ring.advance()?;
                }
                status => {
                    return Err(SearchError::Http(format!(
                        "unexpected status {status} for {query:?}"
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn query_text(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self.fetch(query).await?;
        Ok(response
            .items
            .into_iter()
            .filter_map(|item| item.snippet)
            .collect())
    }

    async fn count_solo(&self, term: &str) -> Result<u64, SearchError> {
        let response = self.fetch(term).await?;
        let information = response
            .search_information
            .ok_or_else(|| SearchError::MalformedResponse("missing searchInformation".into()))?;
        information
            .total_results
            .parse()
            .map_err(|_| {
                SearchError::MalformedResponse(format!(
                    "bad totalResults: {:?}",
                    information.total_results
                ))
            })
    }

    async fn count_near(&self, term_a: &str, term_b: &str) -> Result<u64, SearchError> {
        self.count_solo(&format!("{term_a} AROUND(10) {term_b}")).await
    }

    async fn count_both(&self, term_a: &str, term_b: &str) -> Result<u64, SearchError> {
        self.count_solo(&format!("{term_a} {term_b}")).await
    }
}
