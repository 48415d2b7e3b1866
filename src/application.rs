//! Application layer - coordinates the cache, the analyzer and the store.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::models::{AnalysisRecord, AnalysisResult, BatchEntry};
use crate::error::FetchError;
use crate::repository::AnalysisRepository;
use crate::service::{cache_key, AnalysisCache, Analyzer};

/// Result of a single analysis request.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Served from the cache rather than freshly analyzed
    pub cached: bool,
}

pub struct Application {
    analyzer: Analyzer,
    cache: Option<Arc<dyn AnalysisCache>>,
    repository: Option<Arc<dyn AnalysisRepository>>,
    cache_ttl: Duration,
    history_limit: u32,
}

impl Application {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            cache: None,
            repository: None,
            cache_ttl: Duration::from_secs(300),
            history_limit: 20,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn AnalysisCache>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.cache_ttl = ttl;
        self
    }

    pub fn with_repository(
        mut self,
        repository: Arc<dyn AnalysisRepository>,
        history_limit: u32,
    ) -> Self {
        self.repository = Some(repository);
        self.history_limit = history_limit;
        self
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Cached analysis of `url`. A fresh result is cached and persisted;
    /// a failed save is logged and does not affect the returned result.
    pub async fn analyze(&self, url: &str) -> Result<AnalysisOutcome, FetchError> {
        let key = cache_key(url);

        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get(&key) {
                log::info!("[CACHE] Serving cached analysis of {}", url);
                return Ok(AnalysisOutcome {
                    result,
                    cached: true,
                });
            }
        }

        let result = self.analyzer.analyze(url).await?;

        if let Some(cache) = &self.cache {
            cache.set(&key, result.clone(), self.cache_ttl);
        }

        if let Some(repository) = &self.repository {
            let mut record = result.to_record();
            record.url = url.to_string();
            if let Err(e) = repository.save(&record).await {
                log::warn!("[DB] Failed to persist analysis of {}: {}", url, e);
            }
        }

        Ok(AnalysisOutcome {
            result,
            cached: false,
        })
    }

    /// Uncached, unpersisted batch run.
    pub async fn analyze_batch(&self, urls: &[String]) -> Vec<BatchEntry> {
        self.analyzer.analyze_batch(urls).await
    }

    /// Most recent persisted analyses; empty when no store is configured or
    /// the read fails.
    pub async fn history(&self) -> Vec<AnalysisRecord> {
        let Some(repository) = &self.repository else {
            return Vec::new();
        };

        match repository.recent(self.history_limit).await {
            Ok(records) => records,
            Err(e) => {
                log::warn!("[DB] Failed to read history: {}", e);
                Vec::new()
            }
        }
    }
}
