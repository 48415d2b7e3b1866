//! Page fetching.
//!
//! Retrieves exactly one page. Any final status below 400 counts as success,
//! so soft-error pages with a body are still scored.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use url::Url;

use crate::config::{FetchConfig, InsightsConfig};
use crate::error::FetchError;
use crate::service::http::{create_client, ClientType};

/// A fetched page ready for extraction.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: Url,
    pub status_code: u16,
    pub body: String,
    pub load_time_ms: f64,
}

/// Source of page HTML.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Fetches pages over HTTP.
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(fetch: &FetchConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Page, fetch, &InsightsConfig::default())?,
            timeout_secs: fetch.timeout_secs,
        })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        log::info!("[FETCH] GET {}", url);
        let start = Instant::now();

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, self.timeout_secs))?;

        let status_code = response.status().as_u16();
        if status_code >= 400 {
            log::warn!("[FETCH] {} returned {}", url, status_code);
            return Err(FetchError::Status(status_code));
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout_secs)
            } else {
                FetchError::Body(e.to_string())
            }
        })?;
        let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        log::debug!(
            "[FETCH] {} bytes from {} (status {}) in {:.2}ms",
            body.len(),
            final_url,
            status_code,
            load_time_ms
        );

        Ok(FetchedPage {
            final_url,
            status_code,
            body,
            load_time_ms,
        })
    }
}
