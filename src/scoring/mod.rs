//! Scoring engine.
//!
//! Ten independent category scorers read the raw HTML and the extracted
//! [`PageMetadata`]; the aggregator folds their scores into an overall
//! percentage, grade and percentile bucket; the recommendation generator
//! turns category scores into prioritised actions.
//!
//! Every scorer is a pure function. The only I/O the engine depends on, the
//! ads.txt probe, is resolved by the caller and passed in as a flag.

pub mod aggregate;
mod compliance;
mod content;
pub mod recommendations;
mod technical;

pub use aggregate::{grade_for, overall_score, percentile_bucket};
pub use compliance::{monetization_readiness, policy_compliance, security};
pub use content::{content_depth, content_quality, required_pages};
pub use recommendations::{generate_recommendations, improvement_roadmap};
pub use technical::{mobile_optimization, performance_metrics, technical_seo, ux_design};

use crate::domain::models::{Categories, Category, CategoryResult, PageMetadata};

/// Borrowed view of one fetched page handed to every scorer.
pub struct ScoringInput<'a> {
    pub html: &'a str,
    /// Lower-cased copy of `html` for case-insensitive substring rules
    pub html_lower: String,
    pub metadata: &'a PageMetadata,
}

impl<'a> ScoringInput<'a> {
    pub fn new(html: &'a str, metadata: &'a PageMetadata) -> Self {
        Self {
            html,
            html_lower: html.to_lowercase(),
            metadata,
        }
    }

    /// Case-insensitive test for any of `needles` (given in lower case).
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.html_lower.contains(n))
    }
}

/// Run all ten scorers.
pub fn score_all(input: &ScoringInput<'_>, has_ads_txt: bool) -> Categories {
    Categories {
        content_depth: content_depth(input),
        required_pages: required_pages(input),
        policy_compliance: policy_compliance(input, has_ads_txt),
        technical_seo: technical_seo(input),
        content_quality: content_quality(input),
        mobile_optimization: mobile_optimization(input),
        performance_metrics: performance_metrics(input),
        security: security(input),
        ux_design: ux_design(input),
        monetization_readiness: monetization_readiness(input),
    }
}

/// Accumulates points and findings for one category.
#[derive(Debug)]
pub(crate) struct Tally {
    category: Category,
    score: u32,
    details: Vec<String>,
    issues: Vec<String>,
    tips: Vec<String>,
}

impl Tally {
    pub(crate) fn new(category: Category) -> Self {
        Self {
            category,
            score: 0,
            details: Vec::new(),
            issues: Vec::new(),
            tips: Vec::new(),
        }
    }

    pub(crate) fn award(&mut self, points: u32, detail: impl Into<String>) {
        self.score += points;
        self.details.push(detail.into());
    }

    pub(crate) fn add(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn detail(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    pub(crate) fn issue(&mut self, issue: impl Into<String>) {
        self.issues.push(issue.into());
    }

    pub(crate) fn tip(&mut self, tip: impl Into<String>) {
        self.tips.push(tip.into());
    }

    /// Clamp to the category maximum and seal the result.
    pub(crate) fn finish(self) -> CategoryResult {
        let max = self.category.max_score();
        log::trace!(
            "[SCORE] {}: {}/{} ({} issues)",
            self.category.label(),
            self.score.min(max),
            max,
            self.issues.len()
        );
        CategoryResult {
            score: self.score.min(max),
            max,
            details: self.details,
            issues: self.issues,
            tips: self.tips,
        }
    }
}

/// Format a count with thousands separators ("12,345").
pub(crate) fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
