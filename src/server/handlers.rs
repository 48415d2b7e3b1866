use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::application::Application;
use crate::domain::models::{AnalysisRecord, AnalysisResult, BatchSummary};
use crate::error::{ApiError, AppError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    #[serde(default)]
    pub urls: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("URL is required"))?;

    let outcome = state
        .app
        .analyze(&url)
        .await
        .map_err(|e| ApiError::from(AppError::from(e)))?;

    Ok(Json(AnalyzeResponse {
        success: true,
        data: outcome.result,
        cached: outcome.cached.then_some(true),
    }))
}

pub async fn analyze_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<ListResponse<BatchSummary>>, ApiError> {
    let urls = split_urls(query.urls.as_deref().unwrap_or_default());
    if urls.is_empty() {
        return Err(ApiError::bad_request("URLs required"));
    }

    let entries = state.app.analyze_batch(&urls).await;
    Ok(Json(ListResponse {
        success: true,
        data: entries.iter().map(|entry| entry.summary()).collect(),
    }))
}

pub async fn history(State(state): State<AppState>) -> Json<ListResponse<AnalysisRecord>> {
    Json(ListResponse {
        success: true,
        data: state.app.history().await,
    })
}

/// Comma-separated list, blanks dropped.
fn split_urls(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::analyzer::test_support::{DownInsights, FixedProbe, StaticSource};
    use crate::service::{Analyzer, InMemoryCache};
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::time::Duration;

    const PAGE: &str = "<html><head><title>Knitting patterns</title></head><body><p>about us</p></body></html>";

    fn state() -> AppState {
        let source = StaticSource::default().with_page("https://knit.example/", PAGE);
        let analyzer = Analyzer::new(
            Arc::new(source),
            Arc::new(FixedProbe(false)),
            Arc::new(DownInsights),
            Arc::new(DownInsights),
            10,
        );
        let app = Application::new(analyzer)
            .with_cache(Arc::new(InMemoryCache::new()), Duration::from_secs(60));
        AppState { app: Arc::new(app) }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_split_urls() {
        assert_eq!(
            split_urls("https://a.example, ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(split_urls("").is_empty());
    }

    #[tokio::test]
    async fn test_analyze_requires_url() {
        let response = analyze(State(state()), Json(AnalyzeRequest { url: None }))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "URL is required");
    }

    #[tokio::test]
    async fn test_analyze_success_then_cached() {
        let state = state();
        let request = || {
            Json(AnalyzeRequest {
                url: Some("https://knit.example/".to_string()),
            })
        };

        let first = analyze(State(state.clone()), request()).await.into_response();
        assert_eq!(first.status(), StatusCode::OK);
        let first = body_json(first).await;
        assert_eq!(first["success"], true);
        assert!(first.get("cached").is_none());
        assert_eq!(first["data"]["requiredPages"]["max"], 30);
        assert_eq!(first["data"]["improvements"].as_array().unwrap().len(), 4);

        let second = body_json(analyze(State(state), request()).await.into_response()).await;
        assert_eq!(second["cached"], true);
    }

    #[tokio::test]
    async fn test_analyze_fetch_failure_is_500() {
        let response = analyze(
            State(state()),
            Json(AnalyzeRequest {
                url: Some("https://gone.example/".to_string()),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await["error"],
            "Request failed with status code 404"
        );
    }

    #[tokio::test]
    async fn test_batch_reports_each_url() {
        let response = analyze_batch(
            State(state()),
            Query(BatchQuery {
                urls: Some("https://knit.example/,https://gone.example/".to_string()),
            }),
        )
        .await
        .into_response();
        let body = body_json(response).await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["success"], true);
        assert!(data[0]["score"].is_number());
        assert_eq!(data[1]["success"], false);
        assert!(data[1].get("score").is_none());
    }

    #[tokio::test]
    async fn test_batch_without_urls_is_400() {
        let response = analyze_batch(State(state()), Query(BatchQuery { urls: None }))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_without_store_is_empty_list() {
        let body = body_json(history(State(state())).await.into_response()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let body = body_json(health().await.into_response()).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }
}
