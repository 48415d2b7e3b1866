//! Site resource checks.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::{FetchConfig, InsightsConfig};
use crate::error::ProbeError;
use crate::service::http::{create_client, ClientType};

/// Outcome of probing a well-known resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceStatus {
    Found(String),
    NotFound,
}

impl ResourceStatus {
    pub fn exists(&self) -> bool {
        matches!(self, ResourceStatus::Found(_))
    }
}

/// Reachability of `{origin}/ads.txt`.
#[async_trait]
pub trait AdsTxtProbe: Send + Sync {
    async fn check_ads_txt(&self, page_url: &Url) -> Result<ResourceStatus, ProbeError>;

    /// Probe result collapsed to a flag; every failure means "absent".
    async fn has_ads_txt(&self, page_url: &Url) -> bool {
        match self.check_ads_txt(page_url).await {
            Ok(status) => status.exists(),
            Err(e) => {
                log::debug!("[PROBE] ads.txt check failed for {}: {}", page_url, e);
                false
            }
        }
    }
}

pub struct ResourceChecker {
    client: Client,
}

impl ResourceChecker {
    pub fn new(fetch: &FetchConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Probe, fetch, &InsightsConfig::default())?,
        })
    }

    /// `{origin}/ads.txt` for the page.
    pub fn ads_txt_url(page_url: &Url) -> Result<Url, ProbeError> {
        page_url
            .join("/ads.txt")
            .map_err(|e| ProbeError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl AdsTxtProbe for ResourceChecker {
    async fn check_ads_txt(&self, page_url: &Url) -> Result<ResourceStatus, ProbeError> {
        let resource_url = Self::ads_txt_url(page_url)?;
        log::trace!("[PROBE] HEAD {}", resource_url);

        let response = self
            .client
            .head(resource_url.clone())
            .send()
            .await
            .map_err(|e| ProbeError::Request(e.to_string()))?;

        let status = match response.status() {
            StatusCode::OK => {
                log::debug!("[PROBE] Found: {}", resource_url);
                ResourceStatus::Found(resource_url.to_string())
            }
            status => {
                log::debug!("[PROBE] Status {} for: {}", status, resource_url);
                ResourceStatus::NotFound
            }
        };

        Ok(status)
    }
}
