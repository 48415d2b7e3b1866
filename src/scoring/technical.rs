use super::{ScoringInput, Tally};
use crate::domain::models::{Category, CategoryResult};

/// Page size under which the page counts as optimised, in bytes.
const COMPACT_PAGE_BYTES: usize = 500_000;
/// Page size under which the page counts as moderate, in bytes.
const MODERATE_PAGE_BYTES: usize = 1_000_000;

pub fn technical_seo(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::TechnicalSeo);

    let description_len = meta.meta_description.chars().count();
    if description_len >= 120 {
        tally.award(6, "Excellent meta description");
    } else if description_len > 0 {
        tally.award(3, "Meta description present");
    } else {
        tally.issue("Missing meta description");
        tally.tip("Add meta description");
    }

    let title_len = meta.title.chars().count();
    if (30..=60).contains(&title_len) {
        tally.award(6, "Optimal title length");
    } else if title_len > 0 {
        tally.award(3, "Title present");
    } else {
        tally.issue("Missing title tag");
        tally.tip("Add title tag");
    }

    if meta.viewport.is_some() {
        tally.award(5, "Viewport meta tag");
    } else {
        tally.issue("No viewport tag");
    }

    if meta.has_schema_org {
        tally.award(6, "Schema.org structured data");
    } else {
        tally.detail("No structured data");
        tally.tip("Add Schema.org markup");
    }

    match (meta.has_open_graph, meta.has_twitter_card) {
        (true, true) => tally.award(5, "Open Graph & Twitter Cards"),
        (true, false) | (false, true) => tally.award(3, "Social meta tags"),
        (false, false) => {
            tally.detail("No social meta tags");
            tally.tip("Add Open Graph tags");
        }
    }

    if meta.canonical.is_some() {
        tally.award(3, "Canonical URL set");
    } else {
        tally.detail("No canonical URL");
    }

    if meta.has_sitemap {
        tally.award(4, "Sitemap.xml detected");
    } else {
        tally.tip("Consider adding sitemap.xml");
    }

    tally.finish()
}

pub fn mobile_optimization(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::MobileOptimization);

    let device_width = meta
        .viewport
        .as_deref()
        .is_some_and(|v| v.to_lowercase().contains("width=device-width"));
    if device_width {
        tally.award(8, "Mobile viewport configured");
    } else {
        tally.issue("Mobile viewport not configured");
        tally.tip("Add viewport meta tag");
    }

    if input.html.contains("@media") && input.html.contains("max-width") {
        tally.award(6, "Responsive CSS present");
    } else {
        tally.detail("No responsive CSS detected");
        tally.tip("Add responsive design");
    }

    if input.html.contains("touch") || input.html.contains("mobile") {
        tally.award(5, "Mobile-friendly elements");
    }

    tally.finish()
}

pub fn performance_metrics(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::PerformanceMetrics);

    if meta.lazy_loading {
        tally.award(6, "Lazy loading enabled");
    } else {
        tally.detail("Lazy loading not detected");
        tally.tip("Add lazy loading to images");
    }

    if meta.cdn_usage {
        tally.award(5, "CDN usage detected");
    } else {
        tally.tip("Consider using CDN");
    }

    if meta.html_size < COMPACT_PAGE_BYTES {
        tally.award(5, "Optimized page size");
    } else if meta.html_size < MODERATE_PAGE_BYTES {
        tally.award(3, "Moderate page size");
    } else {
        tally.issue("Large page size");
        tally.tip("Optimize page load time");
    }

    tally.finish()
}

pub fn ux_design(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::UxDesign);

    if meta.has_breadcrumbs {
        tally.award(5, "Breadcrumb navigation");
    } else {
        tally.tip("Add breadcrumbs");
    }

    if meta.has_search_box {
        tally.award(5, "Search functionality");
    } else {
        tally.tip("Add search box");
    }

    if meta.forms_count >= 1 {
        tally.award(4, "Contact/Form present");
    }

    if has_call_to_action(&input.html_lower) {
        tally.award(4, "CTAs detected");
    } else {
        tally.tip("Add call-to-action buttons");
    }

    if input.mentions_any(&["loading", "spinner", "skeleton"]) {
        tally.award(4, "Loading indicators");
    }

    tally.finish()
}

/// "call to action" with optional space or hyphen separators, "button" or "cta".
fn has_call_to_action(html_lower: &str) -> bool {
    use regex::Regex;
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new(r"call[- ]?to[- ]?action|button|cta").unwrap());
    pattern.is_match(html_lower)
}
