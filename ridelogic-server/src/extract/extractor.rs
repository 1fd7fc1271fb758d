//! Concurrent extraction over all pages of a document.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::domain::PlaceRecord;

use super::config::ExtractConfig;
use super::error::ExtractError;
use super::page::scan_page;
use super::registry::PlaceRegistry;

/// A page whose worker did not finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    /// Zero-based page index.
    pub page: usize,
    pub reason: String,
}

/// Result of extracting one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    /// Every stop name in `places_map`, in the same order. A page that
    /// panicked after merging some rows still contributes those names.
    pub places: Vec<String>,
    /// Full records, sorted by name.
    pub places_map: Vec<PlaceRecord>,
    /// Pages that failed, sorted by page index.
    pub failures: Vec<PageFailure>,
}

type PageFn = fn(&str, &ExtractConfig, &PlaceRegistry) -> Result<Vec<String>, ExtractError>;

/// Runs page scans on the blocking pool and folds them into one registry.
#[derive(Debug, Clone)]
pub struct ScheduleExtractor {
    config: Arc<ExtractConfig>,
}

impl ScheduleExtractor {
    pub fn new(config: ExtractConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Extract stops and times from the text of each page.
    ///
    /// At most `max_workers` pages are scanned at once. A page whose
    /// worker panics is reported in [`ExtractionOutcome::failures`] and
    /// the other pages still contribute.
    pub async fn extract(&self, pages: Vec<String>) -> Result<ExtractionOutcome, ExtractError> {
        self.run_pages(pages, scan_page).await
    }

    async fn run_pages(
        &self,
        pages: Vec<String>,
        scan: PageFn,
    ) -> Result<ExtractionOutcome, ExtractError> {
        let page_count = pages.len();
        let registry = Arc::new(PlaceRegistry::new());

        let results: Vec<_> = stream::iter(pages.into_iter().enumerate())
            .map(|(page, text)| {
                let registry = Arc::clone(&registry);
                let config = Arc::clone(&self.config);
                async move {
                    let result =
                        tokio::task::spawn_blocking(move || scan(&text, &config, &registry)).await;
                    (page, result)
                }
            })
            .buffer_unordered(self.config.max_workers)
            .collect()
            .await;

        let mut failures = Vec::new();

        for (page, result) in results {
            match result {
                Ok(Ok(names)) => {
                    tracing::debug!(page, places = names.len(), "Scanned page");
                }
                Ok(Err(e)) => return Err(e),
                Err(e) => {
                    tracing::warn!(page, error = %e, "Page worker failed");
                    let reason = if e.is_panic() {
                        "page worker panicked"
                    } else {
                        "page worker cancelled"
                    };
                    failures.push(PageFailure {
                        page,
                        reason: reason.to_string(),
                    });
                }
            }
        }

        failures.sort_by_key(|f| f.page);
        let places_map = registry.snapshot()?;
        let places: Vec<String> = places_map
            .iter()
            .map(|r| r.name.as_str().to_string())
            .collect();

        tracing::info!(
            pages = page_count,
            places = places.len(),
            failed = failures.len(),
            "Extraction complete"
        );

        Ok(ExtractionOutcome {
            places,
            places_map,
            failures,
        })
    }
}
