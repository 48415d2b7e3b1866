use super::{ScoringInput, Tally};
use crate::domain::models::{Category, CategoryResult};

/// Terms whose presence anywhere in the HTML suggests disallowed content.
pub const DISALLOWED_TERMS: [&str; 5] = ["adult", "gambling", "illegal", "pirated", "warez"];

/// Program policy signals. `has_ads_txt` is the outcome of the ads.txt probe;
/// a failed or timed-out probe arrives here as `false`.
pub fn policy_compliance(input: &ScoringInput<'_>, has_ads_txt: bool) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::PolicyCompliance);

    if meta.has_ssl {
        tally.award(8, "SSL/HTTPS enabled");
    } else {
        tally.issue("SSL/HTTPS not detected");
        tally.tip("Enable HTTPS");
    }

    if input.mentions_any(&["cookie"]) {
        tally.award(4, "Cookie Policy present");
    }

    if meta.has_adsense {
        tally.award(5, "AdSense code detected");
    } else {
        tally.detail("No AdSense code yet");
    }

    if has_ads_txt {
        tally.award(6, "ads.txt file present");
    } else {
        tally.detail("ads.txt not present");
        tally.tip("Add ads.txt");
    }

    if input.mentions_any(&DISALLOWED_TERMS) {
        tally.add(1);
        tally.issue("Problematic content detected");
    } else {
        tally.award(5, "No problematic content");
    }

    tally.finish()
}

pub fn security(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::Security);

    if meta.has_ssl {
        tally.award(8, "SSL/HTTPS enabled");
    } else {
        tally.issue("No HTTPS");
        tally.tip("Enable HTTPS");
    }

    if meta.has_mixed_content {
        tally.issue("Mixed content detected");
        tally.tip("Fix mixed content issues");
    } else {
        tally.award(5, "No mixed content");
    }

    // Case-sensitive: matches the lower-case http-equiv spelling only.
    if input.html.contains("content-security-policy") {
        tally.award(4, "CSP header detected");
    } else {
        tally.tip("Consider adding CSP header");
    }

    tally.finish()
}

pub fn monetization_readiness(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::MonetizationReadiness);

    if meta.has_adsense {
        tally.award(8, "AdSense code already present");
    } else {
        tally.detail("No AdSense code yet");
        tally.tip("Add AdSense after approval");
    }

    if meta.has_analytics {
        tally.award(5, "Analytics tracking present");
    } else {
        tally.tip("Add Google Analytics");
    }

    if meta.has_privacy_policy && meta.has_terms {
        tally.award(4, "Policies in place");
    } else {
        tally.tip("Ensure all policies are present");
    }

    if input.mentions_any(&["affiliate", "partner", "sponsor"]) {
        tally.award(3, "Partner programs detected");
    }

    tally.finish()
}
