//! Short-lived result cache keyed by normalized URL.
//!
//! No single-flight: two concurrent misses for the same URL both run a
//! full analysis and the later `set` wins.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::domain::models::AnalysisResult;

/// Deterministic cache key for a target URL.
pub fn cache_key(url: &str) -> String {
    let trimmed = url.trim();
    match Url::parse(trimmed) {
        Ok(parsed) => format!("analysis_{}", parsed),
        Err(_) => format!("analysis_{}", trimmed),
    }
}

pub trait AnalysisCache: Send + Sync {
    fn get(&self, key: &str) -> Option<AnalysisResult>;
    fn set(&self, key: &str, value: AnalysisResult, ttl: Duration);
}

struct CacheEntry {
    value: AnalysisResult,
    expires_at: Instant,
}

pub struct InMemoryCache {
    entries: Arc<DashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::with_capacity(64)),
        }
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            log::debug!("[CACHE] Purged {} expired entries", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisCache for InMemoryCache {
    fn get(&self, key: &str) -> Option<AnalysisResult> {
        let hit = self.entries.get(key).map(|entry| {
            if entry.expires_at > Instant::now() {
                Some(entry.value.clone())
            } else {
                None
            }
        })?;

        match hit {
            Some(value) => {
                log::debug!("[CACHE] Hit: {}", key);
                Some(value)
            }
            None => {
                self.entries
                    .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
                log::debug!("[CACHE] Expired: {}", key);
                None
            }
        }
    }

    fn set(&self, key: &str, value: AnalysisResult, ttl: Duration) {
        log::debug!("[CACHE] Store: {} (ttl {}s)", key, ttl.as_secs());
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}
