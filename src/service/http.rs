use anyhow::{Context, Result};
use reqwest::{redirect, Client};
use std::time::Duration;

use crate::config::{FetchConfig, InsightsConfig};

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    /// Page under analysis: browser user agent, bounded redirects
    Page,
    /// ads.txt reachability probe
    Probe,
    /// External insight services
    Insight,
}

/// Factory for creating an HTTP client for a given purpose.
pub fn create_client(
    client_type: ClientType,
    fetch: &FetchConfig,
    insights: &InsightsConfig,
) -> Result<Client> {
    let builder = Client::builder();

    match client_type {
        ClientType::Page => builder
            .timeout(Duration::from_secs(fetch.timeout_secs))
            .user_agent(fetch.user_agent.as_str())
            .redirect(redirect::Policy::limited(fetch.max_redirects))
            .build()
            .context("Failed to build page client"),
        ClientType::Probe => builder
            .timeout(Duration::from_secs(fetch.ads_txt_timeout_secs))
            .user_agent(fetch.user_agent.as_str())
            .build()
            .context("Failed to build probe client"),
        ClientType::Insight => builder
            .timeout(Duration::from_secs(insights.timeout_secs))
            .build()
            .context("Failed to build insight client"),
    }
}
