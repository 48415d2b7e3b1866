//! Rich domain entities - behavior lives WITH data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Page metadata ======

/// Per-image signals collected during extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub alt: Option<String>,
    pub has_alt: bool,
    pub lazy_loaded: bool,
}

/// Flat record of everything the scorers read from one fetched page.
/// Produced once per analysis and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub meta_description: String,

    pub h1_count: usize,
    pub h2_count: usize,
    pub total_headings: usize,
    pub paragraph_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_words_per_sentence: usize,

    pub link_count: usize,
    pub internal_links: usize,
    pub external_links: usize,
    pub social_links: usize,
    pub outbound_links: usize,

    pub image_count: usize,
    pub images: Vec<ImageInfo>,
    pub forms_count: usize,

    pub has_newsletter: bool,
    pub has_search_box: bool,
    pub has_breadcrumbs: bool,
    pub has_sitemap: bool,
    pub has_robots: bool,
    pub has_privacy_policy: bool,
    pub has_cookie_policy: bool,
    pub has_terms: bool,
    pub has_about: bool,
    pub has_contact: bool,
    #[serde(rename = "hasSSL")]
    pub has_ssl: bool,
    pub has_schema_org: bool,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_favicon: bool,
    pub has_analytics: bool,
    pub has_adsense: bool,
    pub has_mixed_content: bool,
    pub lazy_loading: bool,
    pub cdn_usage: bool,

    pub viewport: Option<String>,
    pub canonical: Option<String>,
    pub language: String,
    pub html_size: usize,

    pub total_posts: usize,
    pub avg_words_per_post: usize,
    pub longest_post: usize,
    pub shortest_post: usize,
}

// ====== Categories ======

/// The ten scoring dimensions. Closed set: every analysis carries all ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    ContentDepth,
    RequiredPages,
    PolicyCompliance,
    #[serde(rename = "technicalSEO")]
    TechnicalSeo,
    ContentQuality,
    MobileOptimization,
    PerformanceMetrics,
    #[serde(rename = "securityScore")]
    Security,
    UxDesign,
    MonetizationReadiness,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::ContentDepth,
        Category::RequiredPages,
        Category::PolicyCompliance,
        Category::TechnicalSeo,
        Category::ContentQuality,
        Category::MobileOptimization,
        Category::PerformanceMetrics,
        Category::Security,
        Category::UxDesign,
        Category::MonetizationReadiness,
    ];

    /// Fixed maximum score for the category.
    pub fn max_score(&self) -> u32 {
        match self {
            Category::ContentDepth => 50,
            Category::RequiredPages => 30,
            Category::PolicyCompliance => 30,
            Category::TechnicalSeo => 40,
            Category::ContentQuality => 30,
            Category::MobileOptimization => 25,
            Category::PerformanceMetrics => 25,
            Category::Security => 20,
            Category::UxDesign => 25,
            Category::MonetizationReadiness => 25,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::ContentDepth => "Content Depth",
            Category::RequiredPages => "Required Pages",
            Category::PolicyCompliance => "Policy Compliance",
            Category::TechnicalSeo => "Technical SEO",
            Category::ContentQuality => "Content Quality",
            Category::MobileOptimization => "Mobile Optimization",
            Category::PerformanceMetrics => "Performance Metrics",
            Category::Security => "Security",
            Category::UxDesign => "UX Design",
            Category::MonetizationReadiness => "Monetization Readiness",
        }
    }
}

/// Scored output of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResult {
    pub score: u32,
    pub max: u32,
    pub details: Vec<String>,
    pub issues: Vec<String>,
    pub tips: Vec<String>,
}

impl CategoryResult {
    pub fn empty(category: Category) -> Self {
        Self {
            score: 0,
            max: category.max_score(),
            details: Vec::new(),
            issues: Vec::new(),
            tips: Vec::new(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.score as f64 / self.max as f64
        }
    }
}

/// One result per category. A struct rather than a map so a missing
/// category is a compile error, not a runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categories {
    pub content_depth: CategoryResult,
    pub required_pages: CategoryResult,
    pub policy_compliance: CategoryResult,
    #[serde(rename = "technicalSEO")]
    pub technical_seo: CategoryResult,
    pub content_quality: CategoryResult,
    pub mobile_optimization: CategoryResult,
    pub performance_metrics: CategoryResult,
    #[serde(rename = "securityScore")]
    pub security: CategoryResult,
    pub ux_design: CategoryResult,
    pub monetization_readiness: CategoryResult,
}

impl Categories {
    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::ContentDepth => &self.content_depth,
            Category::RequiredPages => &self.required_pages,
            Category::PolicyCompliance => &self.policy_compliance,
            Category::TechnicalSeo => &self.technical_seo,
            Category::ContentQuality => &self.content_quality,
            Category::MobileOptimization => &self.mobile_optimization,
            Category::PerformanceMetrics => &self.performance_metrics,
            Category::Security => &self.security,
            Category::UxDesign => &self.ux_design,
            Category::MonetizationReadiness => &self.monetization_readiness,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn total_score(&self) -> u32 {
        self.iter().map(|(_, r)| r.score).sum()
    }

    pub fn total_max(&self) -> u32 {
        self.iter().map(|(_, r)| r.max).sum()
    }
}

// ====== Grading ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ====== Recommendations ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Info,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub phase: String,
    pub tasks: Vec<String>,
}

// ====== Analysis result ======

/// Final output of one analysis. Built once by the analyzer, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub categories: Categories,
    pub overall_score: u32,
    pub grade: Grade,
    pub percentile: u8,
    pub recommendations: Vec<Recommendation>,
    #[serde(rename = "improvements")]
    pub roadmap: Vec<RoadmapPhase>,
    pub gemini_insights: String,
    pub chatgpt_insights: String,
    pub url: String,
    pub analyzed_at: DateTime<Utc>,
    /// Elapsed wall time in milliseconds
    pub analyze_time: u64,
}

impl AnalysisResult {
    /// Flatten into the row shape handed to the persistence collaborator.
    pub fn to_record(&self) -> AnalysisRecord {
        AnalysisRecord {
            url: self.url.clone(),
            overall_score: self.overall_score,
            grade: self.grade.as_str().to_string(),
            content_depth_score: self.categories.content_depth.score,
            required_pages_score: self.categories.required_pages.score,
            policy_compliance_score: self.categories.policy_compliance.score,
            technical_seo_score: self.categories.technical_seo.score,
            gemini_insights: self.gemini_insights.clone(),
            chatgpt_insights: self.chatgpt_insights.clone(),
            recommendations: self.recommendations.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Flattened record persisted per successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub url: String,
    pub overall_score: u32,
    pub grade: String,
    pub content_depth_score: u32,
    pub required_pages_score: u32,
    pub policy_compliance_score: u32,
    pub technical_seo_score: u32,
    pub gemini_insights: String,
    pub chatgpt_insights: String,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
}

// ====== Batch ======

/// Outcome of one URL in a batch run.
#[derive(Debug)]
pub struct BatchEntry {
    pub url: String,
    pub outcome: Result<AnalysisResult, String>,
}

impl BatchEntry {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn summary(&self) -> BatchSummary {
        match &self.outcome {
            Ok(result) => BatchSummary {
                url: self.url.clone(),
                success: true,
                score: Some(result.overall_score),
                grade: Some(result.grade),
                error: None,
            },
            Err(message) => BatchSummary {
                url: self.url.clone(),
                success: false,
                score: None,
                grade: None,
                error: Some(message.clone()),
            },
        }
    }
}

/// Per-URL batch line as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
