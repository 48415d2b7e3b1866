use super::{group_thousands, ScoringInput, Tally};
use crate::domain::models::{Category, CategoryResult};

/// Volume and structure of the page's content.
pub fn content_depth(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::ContentDepth);

    if meta.total_posts > 0 {
        tally.detail(format!("Posts/articles: {}", meta.total_posts));
        tally.detail(format!("Avg words/post: {}", meta.avg_words_per_post));
    }

    let words = group_thousands(meta.word_count);
    match meta.word_count {
        n if n >= 3000 => tally.award(15, format!("Excellent: {} words", words)),
        n if n >= 2000 => tally.award(12, format!("Great: {} words", words)),
        n if n >= 1000 => tally.award(8, format!("Good: {} words", words)),
        n if n >= 500 => tally.award(4, format!("Moderate: {} words", words)),
        _ => {
            tally.add(1);
            tally.issue("Low word count");
            tally.tip("Aim for 1500+ words");
        }
    }

    match meta.h1_count {
        1..=2 => tally.award(6, "Proper H1 structure"),
        0 => {
            tally.issue("Missing H1");
            tally.tip("Add H1 heading");
        }
        _ => {
            tally.add(3);
            tally.issue("Multiple H1 tags");
        }
    }

    match meta.total_headings {
        n if n >= 15 => tally.award(8, "Excellent heading structure"),
        n if n >= 8 => tally.award(6, "Good hierarchy"),
        n if n >= 4 => tally.award(3, "Basic structure"),
        _ => {
            tally.issue("Limited headings");
            tally.tip("Add more subheadings");
        }
    }

    match meta.paragraph_count {
        n if n >= 30 => tally.award(6, "Rich paragraphs"),
        n if n >= 15 => tally.award(4, "Moderate paragraphs"),
        _ => tally.issue("Low paragraph count"),
    }

    match meta.image_count {
        n if n >= 8 => tally.award(5, format!("Good images: {}", n)),
        n if n >= 4 => tally.award(3, "Some images"),
        _ => {
            tally.issue("Few images");
            tally.tip("Add relevant images");
        }
    }

    match meta.internal_links {
        n if n >= 8 => tally.award(4, "Strong internal linking"),
        n if n >= 4 => tally.award(2, "Basic internal links"),
        _ => {
            tally.issue("Limited internal links");
            tally.tip("Add internal links");
        }
    }

    match meta.outbound_links {
        n if n >= 5 => tally.award(3, "Good external references"),
        n if n >= 2 => tally.award(1, "Some external links"),
        _ => {}
    }

    tally.finish()
}

/// Trust pages a reviewer expects to find, detected by keyword anywhere in
/// the raw HTML.
pub fn required_pages(input: &ScoringInput<'_>) -> CategoryResult {
    struct RequiredPage {
        keyword: &'static str,
        points: u32,
        found: &'static str,
        missing: &'static str,
        tip: &'static str,
    }

    const PAGES: [RequiredPage; 6] = [
        RequiredPage {
            keyword: "privacy",
            points: 10,
            found: "Privacy Policy found",
            missing: "Privacy Policy MISSING",
            tip: "Required for AdSense",
        },
        RequiredPage {
            keyword: "contact",
            points: 6,
            found: "Contact info found",
            missing: "Contact not found",
            tip: "Add contact information",
        },
        RequiredPage {
            keyword: "terms",
            points: 5,
            found: "Terms of Service found",
            missing: "Terms of Service not found",
            tip: "Consider adding Terms",
        },
        RequiredPage {
            keyword: "about",
            points: 4,
            found: "About page found",
            missing: "About page not found",
            tip: "Consider adding About page",
        },
        RequiredPage {
            keyword: "cookie",
            points: 3,
            found: "Cookie Policy found",
            missing: "Cookie Policy not found",
            tip: "Consider adding Cookie Policy",
        },
        RequiredPage {
            keyword: "faq",
            points: 2,
            found: "FAQ section found",
            missing: "FAQ section not found",
            tip: "Consider adding FAQ",
        },
    ];

    let mut tally = Tally::new(Category::RequiredPages);
    for page in &PAGES {
        if input.mentions_any(&[page.keyword]) {
            tally.award(page.points, page.found);
        } else {
            tally.issue(page.missing);
            tally.tip(page.tip);
        }
    }
    tally.finish()
}

/// Navigation and engagement features that signal a maintained site.
pub fn content_quality(input: &ScoringInput<'_>) -> CategoryResult {
    let meta = input.metadata;
    let mut tally = Tally::new(Category::ContentQuality);

    match meta.total_headings {
        n if n >= 10 => tally.award(6, "Well-structured content"),
        n if n >= 5 => tally.award(3, "Basic structure"),
        _ => {}
    }

    if meta.has_breadcrumbs {
        tally.award(5, "Breadcrumb navigation");
    } else {
        tally.tip("Consider adding breadcrumbs");
    }

    if meta.has_search_box {
        tally.award(4, "Search functionality");
    } else {
        tally.tip("Consider adding search");
    }

    if meta.has_newsletter {
        tally.award(5, "Newsletter signup");
    } else {
        tally.tip("Consider adding newsletter signup");
    }

    if input.mentions_any(&["faq"]) {
        tally.award(4, "FAQ section");
    }

    if meta.social_links >= 3 {
        tally.award(3, "Social media links");
    } else {
        tally.tip("Add more social media links");
    }

    tally.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::PageMetadata;
    use crate::scoring::test_support::metadata_for;

    #[test]
    fn test_required_pages_privacy_only() {
        let html = "<html><body><a href=\"/p\">PRIVACY</a></body></html>";
        let meta = metadata_for(html);
        let result = required_pages(&ScoringInput::new(html, &meta));

        assert_eq!(result.score, 10);
        assert_eq!(result.details, vec!["Privacy Policy found"]);
        assert_eq!(result.issues.len(), 5);
        for missing in ["Contact", "Terms", "About", "Cookie", "FAQ"] {
            assert!(
                result.issues.iter().any(|i| i.contains(missing)),
                "missing issue for {}",
                missing
            );
        }
    }

    #[test]
    fn test_required_pages_all_present() {
        let html = "privacy contact terms about cookie faq";
        let meta = PageMetadata::default();
        let result = required_pages(&ScoringInput::new(html, &meta));
        assert_eq!(result.score, 30);
        assert!(result.issues.is_empty());
        assert!(result.tips.is_empty());
    }

    #[test]
    fn test_content_depth_thin_page() {
        let meta = PageMetadata::default();
        let result = content_depth(&ScoringInput::new("", &meta));

        // Only the low-word-count consolation point
        assert_eq!(result.score, 1);
        assert!(result.issues.contains(&"Low word count".to_string()));
        assert!(result.issues.contains(&"Missing H1".to_string()));
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_content_depth_tiers() {
        let meta = PageMetadata {
            word_count: 2500,
            h1_count: 3,
            total_headings: 8,
            paragraph_count: 15,
            image_count: 4,
            internal_links: 4,
            outbound_links: 2,
            total_posts: 3,
            avg_words_per_post: 120,
            ..Default::default()
        };
        let result = content_depth(&ScoringInput::new("", &meta));

        // 12 + 3 + 6 + 4 + 3 + 2 + 1
        assert_eq!(result.score, 31);
        assert_eq!(result.details[0], "Posts/articles: 3");
        assert_eq!(result.details[1], "Avg words/post: 120");
        assert_eq!(result.details[2], "Great: 2,500 words");
        assert_eq!(result.issues, vec!["Multiple H1 tags"]);
    }

    #[test]
    fn test_content_quality_signals() {
        let meta = PageMetadata {
            total_headings: 10,
            has_breadcrumbs: true,
            has_search_box: true,
            has_newsletter: true,
            social_links: 3,
            ..Default::default()
        };
        let result = content_quality(&ScoringInput::new("<h2>FAQ</h2>", &meta));
        assert_eq!(result.score, 27);
        assert!(result.tips.is_empty());
    }
}
