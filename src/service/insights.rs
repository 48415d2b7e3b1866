//! External insight generation (Gemini and OpenAI).
//!
//! Both providers are best-effort: the analyzer substitutes placeholder
//! text for any failure, and nothing is retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::{GeminiConfig, InsightsConfig, OpenAiConfig};
use crate::error::InsightError;

/// A text-producing service consulted after scoring.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Name used in placeholder text ("Failed to get <name> insights").
    fn name(&self) -> &'static str;

    async fn generate(&self, overall_score: u32) -> Result<String, InsightError>;

    /// Insight text, or the fixed placeholder when generation fails.
    async fn insights_or_placeholder(&self, overall_score: u32) -> String {
        match self.generate(overall_score).await {
            Ok(text) => text,
            Err(e) => {
                match &e {
                    InsightError::NotConfigured(_) => {
                        log::debug!("[INSIGHT] {} skipped: {}", self.name(), e)
                    }
                    _ => log::warn!("[INSIGHT] {} failed: {}", self.name(), e),
                }
                e.placeholder(self.name())
            }
        }
    }
}

async fn send_json(
    request: reqwest::RequestBuilder,
    body: serde_json::Value,
) -> Result<serde_json::Value, InsightError> {
    let response = request
        .json(&body)
        .send()
        .await
        .map_err(|e| InsightError::Request(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(InsightError::Status { status, body });
    }

    response
        .json()
        .await
        .map_err(|e| InsightError::MalformedResponse(e.to_string()))
}

// ====== Gemini ======

pub struct GeminiInsights {
    client: Client,
    config: GeminiConfig,
}

impl GeminiInsights {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn prompt(overall_score: u32) -> String {
        format!(
            "Provide 3 actionable recommendations for improving AdSense eligibility. Current score: {}/100. Be specific.",
            overall_score
        )
    }
}

#[async_trait]
impl InsightProvider for GeminiInsights {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, overall_score: u32) -> Result<String, InsightError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(InsightError::NotConfigured("Gemini")),
        };

        let api_url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );
        let request_body = json!({
            "contents": [{
                "parts": [{ "text": Self::prompt(overall_score) }]
            }]
        });

        log::debug!("[INSIGHT] Gemini request for score {}", overall_score);
        let response_json = send_json(
            self.client.post(&api_url).query(&[("key", api_key)]),
            request_body,
        )
        .await?;

        response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                InsightError::MalformedResponse("missing candidates[0] text".to_string())
            })
    }
}

// ====== OpenAI ======

pub struct OpenAiInsights {
    client: Client,
    config: OpenAiConfig,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiInsights {
    pub const SYSTEM_PROMPT: &'static str =
        "You are an AdSense expert. Provide specific actionable advice.";

    pub fn new(client: Client, config: OpenAiConfig) -> Self {
        Self { client, config }
    }

    pub fn user_prompt(overall_score: u32) -> String {
        format!(
            "Score: {}/100. Top 3 improvements needed with detailed steps?",
            overall_score
        )
    }
}

#[async_trait]
impl InsightProvider for OpenAiInsights {
    fn name(&self) -> &'static str {
        "ChatGPT"
    }

    async fn generate(&self, overall_score: u32) -> Result<String, InsightError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(InsightError::NotConfigured("OpenAI")),
        };

        let api_url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );
        let request_body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": Self::SYSTEM_PROMPT },
                { "role": "user", "content": Self::user_prompt(overall_score) }
            ],
            "max_tokens": self.config.max_tokens
        });

        log::debug!("[INSIGHT] OpenAI request for score {}", overall_score);
        let response_json = send_json(
            self.client.post(&api_url).bearer_auth(api_key),
            request_body,
        )
        .await?;

        let completion: ChatCompletion = serde_json::from_value(response_json)
            .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InsightError::MalformedResponse("no choices returned".to_string()))
    }
}

/// Build both providers from configuration, sharing one client.
pub fn providers_from_config(
    client: Client,
    config: &InsightsConfig,
) -> (GeminiInsights, OpenAiInsights) {
    (
        GeminiInsights::new(client.clone(), config.gemini.clone()),
        OpenAiInsights::new(client, config.openai.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn gemini_at(endpoint: &str, api_key: Option<&str>) -> GeminiInsights {
        GeminiInsights::new(
            Client::new(),
            GeminiConfig {
                api_key: api_key.map(str::to_string),
                endpoint: endpoint.to_string(),
                ..Default::default()
            },
        )
    }

    fn openai_at(endpoint: &str, api_key: Option<&str>) -> OpenAiInsights {
        OpenAiInsights::new(
            Client::new(),
            OpenAiConfig {
                api_key: api_key.map(str::to_string),
                endpoint: endpoint.to_string(),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_unconfigured_providers_use_placeholders() {
        let gemini = gemini_at("http://unused", None);
        let openai = openai_at("http://unused", Some(""));

        assert_eq!(
            gemini.insights_or_placeholder(50).await,
            "Gemini API key not configured"
        );
        assert_eq!(
            openai.insights_or_placeholder(50).await,
            "OpenAI API key not configured"
        );
    }

    #[tokio::test]
    async fn test_gemini_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-pro:generateContent")
            .match_query(Matcher::UrlEncoded("key".into(), "g-key".into()))
            .match_body(Matcher::Regex("Current score: 42/100".into()))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"Write more."}]}}]}"#)
            .create_async()
            .await;

        let gemini = gemini_at(&server.url(), Some("g-key"));
        assert_eq!(gemini.generate(42).await.unwrap(), "Write more.");
    }

    #[tokio::test]
    async fn test_gemini_error_status_degrades() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-pro:generateContent")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let gemini = gemini_at(&server.url(), Some("g-key"));
        let err = gemini.generate(42).await.unwrap_err();
        assert!(matches!(err, InsightError::Status { status: 500, .. }));
        assert_eq!(
            gemini.insights_or_placeholder(42).await,
            "Failed to get Gemini insights"
        );
    }

    #[tokio::test]
    async fn test_openai_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer o-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 200
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Add ads.txt."}}]}"#)
            .create_async()
            .await;

        let openai = openai_at(&server.url(), Some("o-key"));
        assert_eq!(openai.generate(70).await.unwrap(), "Add ads.txt.");
    }

    #[tokio::test]
    async fn test_openai_malformed_response_degrades() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let openai = openai_at(&server.url(), Some("o-key"));
        assert_eq!(
            openai.insights_or_placeholder(70).await,
            "Failed to get ChatGPT insights"
        );
    }
}
