#[cfg(test)]
pub mod fixtures {
    use chrono::Utc;
    use sqlx::SqlitePool;

    use crate::domain::models::{AnalysisResult, Categories, Category, CategoryResult, Grade};

    /// Creates an in-memory SQLite database with migrations applied
    pub async fn setup_test_db() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    /// A result with every category empty
    pub fn sample_result(url: &str, overall_score: u32) -> AnalysisResult {
        AnalysisResult {
            categories: Categories {
                content_depth: CategoryResult::empty(Category::ContentDepth),
                required_pages: CategoryResult::empty(Category::RequiredPages),
                policy_compliance: CategoryResult::empty(Category::PolicyCompliance),
                technical_seo: CategoryResult::empty(Category::TechnicalSeo),
                content_quality: CategoryResult::empty(Category::ContentQuality),
                mobile_optimization: CategoryResult::empty(Category::MobileOptimization),
                performance_metrics: CategoryResult::empty(Category::PerformanceMetrics),
                security: CategoryResult::empty(Category::Security),
                ux_design: CategoryResult::empty(Category::UxDesign),
                monetization_readiness: CategoryResult::empty(Category::MonetizationReadiness),
            },
            overall_score,
            grade: Grade::F,
            percentile: 10,
            recommendations: vec![],
            roadmap: vec![],
            gemini_insights: "Gemini API key not configured".to_string(),
            chatgpt_insights: "OpenAI API key not configured".to_string(),
            url: url.to_string(),
            analyzed_at: Utc::now(),
            analyze_time: 12,
        }
    }
}
