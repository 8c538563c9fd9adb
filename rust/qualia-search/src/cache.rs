//! The query-response cache collaborator.
//!
//! Keyed by the literal query string with an explicit hit/miss contract.
//! Deliberately not folded into [`SearchProvider`]: the provider consults a
//! cache it was given, and tests can observe hits and misses directly.
//!
//! [`SearchProvider`]: crate::provider::SearchProvider

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base58::ToBase58;
use sieve_cache::SieveCache;
use tokio::sync::Mutex;

use crate::error::SearchError;

/// A key→response store for raw provider responses.
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// The cached response for `query`, or `None` on a miss.
    async fn get(&self, query: &str) -> Result<Option<String>, SearchError>;

    /// Store the response for `query`.
    async fn put(&self, query: &str, response: &str) -> Result<(), SearchError>;
}

/// On-disk cache: one file per query under a cache directory.
///
/// Query strings contain quotes, spaces, and search operators, so file
/// names are the base58 of the query's blake3 hash rather than the query
/// itself.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Open (and create if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SearchError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|error| SearchError::Cache(format!("{}: {error}", dir.display())))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, query: &str) -> PathBuf {
        let digest = blake3::hash(query.as_bytes());
        self.dir.join(digest.as_bytes().to_base58())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl QueryCache for DiskCache {
    async fn get(&self, query: &str) -> Result<Option<String>, SearchError> {
        match tokio::fs::read_to_string(self.entry_path(query)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(SearchError::Cache(error.to_string())),
        }
    }

    async fn put(&self, query: &str, response: &str) -> Result<(), SearchError> {
        tokio::fs::write(self.entry_path(query), response)
            .await
            .map_err(|error| SearchError::Cache(error.to_string()))
    }
}

/// In-memory cache with SIEVE eviction, for runs that should not touch the
/// filesystem.
#[derive(Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<SieveCache<String, String>>>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Result<Self, SearchError> {
        Ok(Self {
            entries: Arc::new(Mutex::new(SieveCache::new(capacity).map_err(
                |error| SearchError::Cache(format!("could not initialize cache: {error}")),
            )?)),
        })
    }
}

#[async_trait]
impl QueryCache for MemoryCache {
    async fn get(&self, query: &str) -> Result<Option<String>, SearchError> {
        Ok(self.entries.lock().await.get(&query.to_string()).cloned())
    }

    async fn put(&self, query: &str, response: &str) -> Result<(), SearchError> {
        self.entries
            .lock()
            .await
            .insert(query.to_string(), response.to_string());
        Ok(())
    }
}
