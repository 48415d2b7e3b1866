use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};

use crate::domain::models::{AnalysisRecord, Recommendation};
use crate::error::PersistenceError;
use crate::repository::AnalysisRepository;

pub struct SqliteAnalysisRepository {
    pool: SqlitePool,
}

impl SqliteAnalysisRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for SqliteAnalysisRepository {
    async fn save(&self, record: &AnalysisRecord) -> Result<(), PersistenceError> {
        let recommendations = serde_json::to_string(&record.recommendations)?;

        sqlx::query(
            "INSERT INTO analysis_results \
             (url, overall_score, grade, content_depth_score, required_pages_score, \
              policy_compliance_score, technical_seo_score, gemini_insights, \
              chatgpt_insights, recommendations, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.url)
        .bind(i64::from(record.overall_score))
        .bind(&record.grade)
        .bind(i64::from(record.content_depth_score))
        .bind(i64::from(record.required_pages_score))
        .bind(i64::from(record.policy_compliance_score))
        .bind(i64::from(record.technical_seo_score))
        .bind(&record.gemini_insights)
        .bind(&record.chatgpt_insights)
        .bind(recommendations)
        .bind(record.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await?;

        log::debug!("[DB] Saved analysis of {}", record.url);
        Ok(())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>, PersistenceError> {
        let rows = sqlx::query(
            "SELECT url, overall_score, grade, content_depth_score, required_pages_score, \
                    policy_compliance_score, technical_seo_score, gemini_insights, \
                    chatgpt_insights, recommendations, created_at \
             FROM analysis_results \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<AnalysisRecord, PersistenceError> {
                let recommendations: Vec<Recommendation> =
                    serde_json::from_str(row.try_get::<&str, _>("recommendations")?)?;
                Ok(AnalysisRecord {
                    url: row.try_get("url")?,
                    overall_score: score(row.try_get("overall_score")?),
                    grade: row.try_get("grade")?,
                    content_depth_score: score(row.try_get("content_depth_score")?),
                    required_pages_score: score(row.try_get("required_pages_score")?),
                    policy_compliance_score: score(row.try_get("policy_compliance_score")?),
                    technical_seo_score: score(row.try_get("technical_seo_score")?),
                    gemini_insights: row.try_get("gemini_insights")?,
                    chatgpt_insights: row.try_get("chatgpt_insights")?,
                    recommendations,
                    created_at: parse_datetime(row.try_get("created_at")?),
                })
            })
            .collect()
    }
}

fn score(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn parse_datetime(s: &str) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
