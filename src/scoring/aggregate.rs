//! Overall score, percentile bucket and letter grade.

use crate::domain::models::{Categories, Grade};

/// Overall readiness as a rounded percentage of the summed category maxima.
pub fn overall_score(categories: &Categories) -> u32 {
    let max = categories.total_max();
    if max == 0 {
        return 0;
    }
    (100.0 * categories.total_score() as f64 / max as f64).round() as u32
}

/// Fixed percentile bucket for an overall score. This is a lookup table,
/// not a rank against real sites.
pub fn percentile_bucket(overall: u32) -> u8 {
    match overall {
        n if n >= 85 => 90,
        n if n >= 70 => 70,
        n if n >= 50 => 50,
        n if n >= 30 => 25,
        _ => 10,
    }
}

pub fn grade_for(overall: u32) -> Grade {
    match overall {
        n if n >= 90 => Grade::APlus,
        n if n >= 85 => Grade::A,
        n if n >= 80 => Grade::AMinus,
        n if n >= 75 => Grade::BPlus,
        n if n >= 70 => Grade::B,
        n if n >= 65 => Grade::BMinus,
        n if n >= 60 => Grade::CPlus,
        n if n >= 55 => Grade::C,
        n if n >= 50 => Grade::CMinus,
        n if n >= 40 => Grade::D,
        _ => Grade::F,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Category, CategoryResult};

    fn categories_scoring(total: u32) -> Categories {
        // Pour the total into categories in order, respecting each maximum.
        let mut remaining = total;
        let mut take = |category: Category| {
            let max = category.max_score();
            let score = remaining.min(max);
            remaining -= score;
            CategoryResult {
                score,
                ..CategoryResult::empty(category)
            }
        };
        Categories {
            content_depth: take(Category::ContentDepth),
            required_pages: take(Category::RequiredPages),
            policy_compliance: take(Category::PolicyCompliance),
            technical_seo: take(Category::TechnicalSeo),
            content_quality: take(Category::ContentQuality),
            mobile_optimization: take(Category::MobileOptimization),
            performance_metrics: take(Category::PerformanceMetrics),
            security: take(Category::Security),
            ux_design: take(Category::UxDesign),
            monetization_readiness: take(Category::MonetizationReadiness),
        }
    }

    #[test]
    fn test_overall_score_rounds_against_320() {
        assert_eq!(overall_score(&categories_scoring(0)), 0);
        assert_eq!(overall_score(&categories_scoring(320)), 100);
        assert_eq!(overall_score(&categories_scoring(160)), 50);
        // 100 / 320 = 31.25
        assert_eq!(overall_score(&categories_scoring(100)), 31);
        // 226 / 320 = 70.625
        assert_eq!(overall_score(&categories_scoring(226)), 71);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_for(100), Grade::APlus);
        assert_eq!(grade_for(90), Grade::APlus);
        assert_eq!(grade_for(89), Grade::A);
        assert_eq!(grade_for(85), Grade::A);
        assert_eq!(grade_for(80), Grade::AMinus);
        assert_eq!(grade_for(75), Grade::BPlus);
        assert_eq!(grade_for(70), Grade::B);
        assert_eq!(grade_for(65), Grade::BMinus);
        assert_eq!(grade_for(60), Grade::CPlus);
        assert_eq!(grade_for(55), Grade::C);
        assert_eq!(grade_for(50), Grade::CMinus);
        assert_eq!(grade_for(40), Grade::D);
        assert_eq!(grade_for(39), Grade::F);
        assert_eq!(grade_for(0), Grade::F);
    }

    #[test]
    fn test_percentile_buckets() {
        assert_eq!(percentile_bucket(100), 90);
        assert_eq!(percentile_bucket(85), 90);
        assert_eq!(percentile_bucket(84), 70);
        assert_eq!(percentile_bucket(70), 70);
        assert_eq!(percentile_bucket(50), 50);
        assert_eq!(percentile_bucket(30), 25);
        assert_eq!(percentile_bucket(29), 10);
    }
}
