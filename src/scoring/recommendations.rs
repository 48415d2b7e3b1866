//! Prioritised action items and the fixed improvement roadmap.

use crate::domain::models::{Categories, Priority, Recommendation, RoadmapPhase};

fn recommend(priority: Priority, action: &str, impact: &str) -> Recommendation {
    Recommendation {
        priority,
        action: action.to_string(),
        impact: impact.to_string(),
    }
}

/// Derive recommendations from category scores. Each rule is evaluated
/// independently; output order is the rule order.
pub fn generate_recommendations(categories: &Categories, overall: u32) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let required = categories.required_pages.score;
    if required < 15 {
        recs.push(recommend(
            Priority::High,
            "Add Privacy Policy page - REQUIRED for AdSense",
            "+10 pts",
        ));
    }
    if (15..20).contains(&required) {
        recs.push(recommend(Priority::Medium, "Add Contact page for trust", "+6 pts"));
    }
    if categories.content_depth.score < 25 {
        recs.push(recommend(
            Priority::High,
            "Increase content to 1000+ words",
            "+15 pts",
        ));
    }
    if categories.technical_seo.score < 25 {
        recs.push(recommend(
            Priority::Medium,
            "Add meta description and title",
            "+10 pts",
        ));
    }
    if categories.performance_metrics.score < 15 {
        recs.push(recommend(Priority::Medium, "Enable lazy loading", "+6 pts"));
    }
    if categories.monetization_readiness.score < 15 {
        recs.push(recommend(Priority::Medium, "Add ads.txt file", "+5 pts"));
    }
    if overall >= 70 {
        recs.push(recommend(
            Priority::Info,
            "Great! Your site is well-optimized for AdSense",
            "Maintain",
        ));
    }

    recs
}

/// Four-week plan. Identical for every analysis.
pub fn improvement_roadmap() -> Vec<RoadmapPhase> {
    const PLAN: [(&str, [&str; 3]); 4] = [
        (
            "Week 1",
            [
                "Fix critical issues (Privacy Policy, SSL)",
                "Add missing meta tags",
                "Improve content depth",
            ],
        ),
        (
            "Week 2",
            ["Add ads.txt", "Implement lazy loading", "Add structured data"],
        ),
        (
            "Week 3",
            [
                "Enhance mobile optimization",
                "Add analytics",
                "Create FAQ section",
            ],
        ),
        (
            "Week 4",
            ["Fine-tune performance", "Add CTAs", "Submit for AdSense review"],
        ),
    ];

    PLAN.iter()
        .map(|(phase, tasks)| RoadmapPhase {
            phase: phase.to_string(),
            tasks: tasks.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}
