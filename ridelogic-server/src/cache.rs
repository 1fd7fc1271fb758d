//! Caching layer for extraction results.
//!
//! Extracting a document scans every page, so completed outcomes are
//! kept per document name for a while. Failed loads are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::documents::{DocumentError, DocumentSource};
use crate::extract::{ExtractError, ExtractionOutcome, ScheduleExtractor};

/// Cached outcome of one document.
type OutcomeEntry = Arc<ExtractionOutcome>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached documents.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 256,
        }
    }
}

/// Errors loading a document for extraction.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The blocking read task did not complete
    #[error("document read task failed: {0}")]
    Worker(String),
}

/// Extraction outcomes keyed by document name.
pub struct ExtractionCache {
    outcomes: MokaCache<String, OutcomeEntry>,
}

impl ExtractionCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let outcomes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { outcomes }
    }

    pub async fn get(&self, name: &str) -> Option<OutcomeEntry> {
        self.outcomes.get(name).await
    }

    pub async fn insert(&self, name: String, entry: OutcomeEntry) {
        self.outcomes.insert(name, entry).await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.outcomes.invalidate_all();
    }
}

/// Schedule extractor with caching.
///
/// Reads documents from a [`DocumentSource`] and caches each outcome.
pub struct CachedExtractor {
    documents: Arc<dyn DocumentSource>,
    extractor: ScheduleExtractor,
    cache: ExtractionCache,
}

impl CachedExtractor {
    pub fn new(
        documents: Arc<dyn DocumentSource>,
        extractor: ScheduleExtractor,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            documents,
            extractor,
            cache: ExtractionCache::new(cache_config),
        }
    }

    /// Extract a document, using the cache if available.
    pub async fn extract(&self, name: &str) -> Result<OutcomeEntry, LoadError> {
        if let Some(cached) = self.cache.get(name).await {
            tracing::debug!(document = name, "Extraction cache hit");
            return Ok(cached);
        }

        let pages = self.read_pages(name).await?;
        tracing::info!(document = name, pages = pages.len(), "Extracting document");

        let entry = Arc::new(self.extractor.extract(pages).await?);
        self.cache.insert(name.to_string(), Arc::clone(&entry)).await;

        Ok(entry)
    }

    /// Names of the documents available for extraction.
    pub async fn list(&self) -> Result<Vec<String>, LoadError> {
        let documents = Arc::clone(&self.documents);
        tokio::task::spawn_blocking(move || documents.list())
            .await
            .map_err(|e| LoadError::Worker(e.to_string()))?
            .map_err(LoadError::from)
    }

    async fn read_pages(&self, name: &str) -> Result<Vec<String>, LoadError> {
        let documents = Arc::clone(&self.documents);
        let name = name.to_string();
        tokio::task::spawn_blocking(move || documents.pages(&name))
            .await
            .map_err(|e| LoadError::Worker(e.to_string()))?
            .map_err(LoadError::from)
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}
