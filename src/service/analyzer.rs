//! Orchestrator: fetch, extract, score, aggregate, then insights and
//! recommendations.
//!
//! Only the page fetch can fail an analysis. The ads.txt probe and both
//! insight providers degrade to defaults.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use url::Url;

use crate::config::Config;
use crate::domain::models::{AnalysisResult, BatchEntry};
use crate::error::FetchError;
use crate::extractor::PageExtractor;
use crate::scoring::{
    generate_recommendations, grade_for, improvement_roadmap, overall_score, percentile_bucket,
    score_all, ScoringInput,
};
use crate::service::fetcher::{HttpFetcher, PageSource};
use crate::service::http::{create_client, ClientType};
use crate::service::insights::{providers_from_config, InsightProvider};
use crate::service::resources::{AdsTxtProbe, ResourceChecker};

pub struct Analyzer {
    source: Arc<dyn PageSource>,
    ads_txt: Arc<dyn AdsTxtProbe>,
    gemini: Arc<dyn InsightProvider>,
    chatgpt: Arc<dyn InsightProvider>,
    max_batch: usize,
}

impl Analyzer {
    pub fn new(
        source: Arc<dyn PageSource>,
        ads_txt: Arc<dyn AdsTxtProbe>,
        gemini: Arc<dyn InsightProvider>,
        chatgpt: Arc<dyn InsightProvider>,
        max_batch: usize,
    ) -> Self {
        Self {
            source,
            ads_txt,
            gemini,
            chatgpt,
            max_batch,
        }
    }

    /// Wire the HTTP-backed collaborators from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let insight_client = create_client(ClientType::Insight, &config.fetch, &config.insights)?;
        let (gemini, openai) = providers_from_config(insight_client, &config.insights);

        Ok(Self::new(
            Arc::new(HttpFetcher::new(&config.fetch)?),
            Arc::new(ResourceChecker::new(&config.fetch)?),
            Arc::new(gemini),
            Arc::new(openai),
            config.batch.max_urls,
        ))
    }

    pub fn max_batch(&self) -> usize {
        self.max_batch
    }

    /// Run one complete analysis of `target`.
    #[tracing::instrument(skip(self))]
    pub async fn analyze(&self, target: &str) -> Result<AnalysisResult, FetchError> {
        let start = Instant::now();
        let url = parse_target(target)?;

        let page = self.source.fetch(&url).await?;
        let metadata = PageExtractor::extract(&page.body, &url);
        let has_ads_txt = self.ads_txt.has_ads_txt(&url).await;

        let categories = {
            let input = ScoringInput::new(&page.body, &metadata);
            score_all(&input, has_ads_txt)
        };
        let overall = overall_score(&categories);
        let grade = grade_for(overall);
        let percentile = percentile_bucket(overall);
        log::info!(
            "[SCORE] {} scored {}/100 ({}, {}th percentile)",
            url,
            overall,
            grade,
            percentile
        );

        // Recommendations read category scores only, so they need not wait
        // for the insight calls.
        let ((gemini_insights, chatgpt_insights), (recommendations, roadmap)) = tokio::join!(
            async {
                tokio::join!(
                    self.gemini.insights_or_placeholder(overall),
                    self.chatgpt.insights_or_placeholder(overall)
                )
            },
            async {
                (
                    generate_recommendations(&categories, overall),
                    improvement_roadmap(),
                )
            }
        );

        let analyze_time = start.elapsed().as_millis() as u64;
        log::debug!("[SCORE] {} analyzed in {}ms", url, analyze_time);

        Ok(AnalysisResult {
            categories,
            overall_score: overall,
            grade,
            percentile,
            recommendations,
            roadmap,
            gemini_insights,
            chatgpt_insights,
            url: target.trim().to_string(),
            analyzed_at: Utc::now(),
            analyze_time,
        })
    }

    /// Analyze up to `max_batch` URLs one after another. A failed URL is
    /// recorded and the batch continues.
    pub async fn analyze_batch(&self, urls: &[String]) -> Vec<BatchEntry> {
        if urls.len() > self.max_batch {
            log::warn!(
                "[SCORE] Batch of {} URLs truncated to {}",
                urls.len(),
                self.max_batch
            );
        }

        let mut entries = Vec::with_capacity(urls.len().min(self.max_batch));
        for url in urls.iter().take(self.max_batch) {
            let outcome = self.analyze(url).await.map_err(|e| {
                log::warn!("[SCORE] Batch entry {} failed: {}", url, e);
                e.to_string()
            });
            entries.push(BatchEntry {
                url: url.clone(),
                outcome,
            });
        }
        entries
    }
}

fn parse_target(target: &str) -> Result<Url, FetchError> {
    Url::parse(target.trim()).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", target, e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use url::Url;

    use crate::error::{FetchError, InsightError, ProbeError};
    use crate::service::fetcher::{FetchedPage, PageSource};
    use crate::service::insights::InsightProvider;
    use crate::service::resources::{AdsTxtProbe, ResourceStatus};

    /// Serves canned bodies; unknown URLs are a 404.
    #[derive(Default)]
    pub struct StaticSource {
        pages: HashMap<String, String>,
    }

    impl StaticSource {
        pub fn with_page(mut self, url: &str, body: &str) -> Self {
            let key = Url::parse(url).map(|u| u.to_string()).unwrap_or_default();
            self.pages.insert(key, body.to_string());
            self
        }
    }

    #[async_trait]
    impl PageSource for StaticSource {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
            match self.pages.get(url.as_str()) {
                Some(body) => Ok(FetchedPage {
                    final_url: url.clone(),
                    status_code: 200,
                    body: body.clone(),
                    load_time_ms: 1.0,
                }),
                None => Err(FetchError::Status(404)),
            }
        }
    }

    pub struct FixedProbe(pub bool);

    #[async_trait]
    impl AdsTxtProbe for FixedProbe {
        async fn check_ads_txt(&self, page_url: &Url) -> Result<ResourceStatus, ProbeError> {
            if self.0 {
                Ok(ResourceStatus::Found(format!("{}ads.txt", page_url)))
            } else {
                Err(ProbeError::Request("timed out".to_string()))
            }
        }
    }

    pub struct EchoInsights(pub &'static str);

    #[async_trait]
    impl InsightProvider for EchoInsights {
        fn name(&self) -> &'static str {
            self.0
        }

        async fn generate(&self, overall_score: u32) -> Result<String, InsightError> {
            Ok(format!("{} says {}", self.0, overall_score))
        }
    }

    pub struct DownInsights;

    #[async_trait]
    impl InsightProvider for DownInsights {
        fn name(&self) -> &'static str {
            "ChatGPT"
        }

        async fn generate(&self, _overall_score: u32) -> Result<String, InsightError> {
            Err(InsightError::Request("connection refused".to_string()))
        }
    }
}
