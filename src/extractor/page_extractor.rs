use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use super::words::count_words;
use crate::domain::models::{ImageInfo, PageMetadata};

/// Post/article selectors, evaluated in order. An element matched by more
/// than one selector is counted once per match.
pub const POST_SELECTORS: [&str; 10] = [
    "article",
    ".post",
    ".blog-post",
    ".entry-post",
    ".post-item",
    "[class*=\"post-\"]",
    ".blog .post",
    ".blog article",
    ".loop .item",
    ".posts-list .post",
];

/// Platform names that mark a link as social.
const SOCIAL_PATTERN: &str = r"(?i)facebook|twitter|instagram|linkedin|youtube";

struct Selectors {
    body: Selector,
    title: Selector,
    meta_description: Selector,
    headings: Selector,
    h1: Selector,
    h2: Selector,
    paragraph: Selector,
    anchor: Selector,
    anchor_href: Selector,
    image: Selector,
    form: Selector,
    search_input: Selector,
    breadcrumbs: Selector,
    viewport: Selector,
    canonical: Selector,
    ld_json: Selector,
    open_graph: Selector,
    twitter_card: Selector,
    favicon: Selector,
    html: Selector,
    posts: Vec<Selector>,
}

fn selectors() -> &'static Selectors {
    static SELECTORS: OnceLock<Selectors> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        let parse = |css: &str| Selector::parse(css).unwrap();
        Selectors {
            body: parse("body"),
            title: parse("title"),
            meta_description: parse("meta[name=\"description\"]"),
            headings: parse("h1, h2, h3, h4, h5, h6"),
            h1: parse("h1"),
            h2: parse("h2"),
            paragraph: parse("p"),
            anchor: parse("a"),
            anchor_href: parse("a[href]"),
            image: parse("img"),
            form: parse("form"),
            search_input: parse("input[type=\"search\"]"),
            breadcrumbs: parse("nav[aria-label=\"breadcrumb\"], .breadcrumbs"),
            viewport: parse("meta[name=\"viewport\"]"),
            canonical: parse("link[rel=\"canonical\"]"),
            ld_json: parse("script[type=\"application/ld+json\"]"),
            open_graph: parse("meta[property^=\"og:\"]"),
            twitter_card: parse("meta[name^=\"twitter:\"]"),
            favicon: parse("link[rel=\"icon\"]"),
            html: parse("html"),
            posts: POST_SELECTORS.iter().map(|css| parse(css)).collect(),
        }
    })
}

struct Patterns {
    social: Regex,
    newsletter: Regex,
    sentence_break: Regex,
    sitemap: Regex,
    robots: Regex,
    privacy: Regex,
    cookie: Regex,
    terms: Regex,
    about: Regex,
    contact: Regex,
    analytics: Regex,
    adsense: Regex,
    mixed_content: Regex,
    cdn: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).unwrap();
        Patterns {
            social: re(SOCIAL_PATTERN),
            newsletter: re(r"(?i)newsletter|subscribe|signup"),
            sentence_break: re(r"[.!?]+"),
            sitemap: re(r"(?i)sitemap\.xml"),
            robots: re(r"(?i)robots\.txt"),
            privacy: re(r"(?i)privacy"),
            cookie: re(r"(?i)cookie"),
            terms: re(r"(?i)terms"),
            about: re(r"(?i)about"),
            contact: re(r"(?i)contact"),
            analytics: re(r"(?i)google-analytics|gtag|ga4"),
            adsense: re(r"(?i)adsbygoogle|googlesyndication"),
            mixed_content: re(r"(?i)http://"),
            cdn: re(r"(?i)cdn|cloudflare"),
        }
    })
}

/// Absolute links on the page, split by destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkBuckets {
    pub internal: Vec<String>,
    pub external: Vec<String>,
    pub social: Vec<String>,
}

impl LinkBuckets {
    /// External links that are not social platforms.
    ///
    /// Social links are already routed to their own bucket during
    /// classification, so this filter normally removes nothing; it is kept
    /// because outbound-link scoring depends on this exact count.
    pub fn outbound(&self) -> Vec<&str> {
        let social = &patterns().social;
        self.external
            .iter()
            .map(String::as_str)
            .filter(|href| !social.is_match(href))
            .collect()
    }
}

/// Word-count statistics over post-like elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub average_words: usize,
    pub longest: usize,
    pub shortest: usize,
}

pub struct PageExtractor;

impl PageExtractor {
    /// Derive the full metadata record for a fetched page. `page_url` is the
    /// URL the analysis was requested for; it decides SSL and link locality.
    pub fn extract(body: &str, page_url: &Url) -> PageMetadata {
        let document = Html::parse_document(body);
        let sel = selectors();
        let pat = patterns();

        let body_text = Self::extract_body_text(&document);
        let word_count = body_text.split_whitespace().count();
        let sentence_count = pat
            .sentence_break
            .split(&body_text)
            .filter(|s| !s.trim().is_empty())
            .count();

        let links = Self::extract_links(&document, page_url);
        let outbound_links = links.outbound().len();
        let images = Self::extract_images(&document);
        let posts = Self::extract_post_stats(&document);

        PageMetadata {
            title: Self::extract_title(&document),
            meta_description: Self::extract_meta_description(&document),

            h1_count: document.select(&sel.h1).count(),
            h2_count: document.select(&sel.h2).count(),
            total_headings: document.select(&sel.headings).count(),
            paragraph_count: document.select(&sel.paragraph).count(),
            word_count,
            sentence_count,
            avg_words_per_sentence: (word_count as f64 / sentence_count.max(1) as f64).round()
                as usize,

            link_count: document.select(&sel.anchor).count(),
            internal_links: links.internal.len(),
            external_links: links.external.len(),
            social_links: links.social.len(),
            outbound_links,

            image_count: images.len(),
            images,
            forms_count: document.select(&sel.form).count(),

            has_newsletter: pat.newsletter.is_match(&body_text),
            has_search_box: document.select(&sel.search_input).next().is_some(),
            has_breadcrumbs: document.select(&sel.breadcrumbs).next().is_some(),
            has_sitemap: pat.sitemap.is_match(body),
            has_robots: pat.robots.is_match(body),
            has_privacy_policy: pat.privacy.is_match(&body_text),
            has_cookie_policy: pat.cookie.is_match(&body_text),
            has_terms: pat.terms.is_match(&body_text),
            has_about: pat.about.is_match(&body_text),
            has_contact: pat.contact.is_match(&body_text),
            has_ssl: page_url.scheme() == "https",
            has_schema_org: body.contains("schema.org")
                || document.select(&sel.ld_json).next().is_some(),
            has_open_graph: document.select(&sel.open_graph).next().is_some(),
            has_twitter_card: document.select(&sel.twitter_card).next().is_some(),
            has_favicon: document.select(&sel.favicon).next().is_some(),
            has_analytics: pat.analytics.is_match(body),
            has_adsense: pat.adsense.is_match(body),
            has_mixed_content: pat.mixed_content.is_match(body),
            lazy_loading: body.contains("loading=\"lazy\""),
            cdn_usage: pat.cdn.is_match(body),

            viewport: Self::first_attr(&document, &sel.viewport, "content"),
            canonical: Self::first_attr(&document, &sel.canonical, "href"),
            language: Self::first_attr(&document, &sel.html, "lang")
                .unwrap_or_else(|| "not specified".to_string()),
            html_size: body.len(),

            total_posts: posts.total,
            avg_words_per_post: posts.average_words,
            longest_post: posts.longest,
            shortest_post: posts.shortest,
        }
    }

    pub fn extract_body_text(document: &Html) -> String {
        document
            .select(&selectors().body)
            .map(|body| body.text().collect::<String>())
            .collect()
    }

    /// Text of every `<title>` element, trimmed.
    pub fn extract_title(document: &Html) -> String {
        document
            .select(&selectors().title)
            .map(|el| el.text().collect::<String>())
            .collect::<String>()
            .trim()
            .to_string()
    }

    pub fn extract_meta_description(document: &Html) -> String {
        Self::first_attr(document, &selectors().meta_description, "content").unwrap_or_default()
    }

    /// First matching element's attribute, ignoring empty values.
    fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Classify absolute `http(s)` anchors. Relative hrefs are not counted.
    pub fn extract_links(document: &Html, page_url: &Url) -> LinkBuckets {
        let social = &patterns().social;
        let page_host = page_url.host_str();
        let mut buckets = LinkBuckets::default();

        for element in document.select(&selectors().anchor_href) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if !href.starts_with("http") {
                continue;
            }

            let same_host = Url::parse(href)
                .ok()
                .is_some_and(|link| link.host_str().is_some() && link.host_str() == page_host);

            if same_host {
                buckets.internal.push(href.to_string());
            } else if social.is_match(href) {
                buckets.social.push(href.to_string());
            } else {
                buckets.external.push(href.to_string());
            }
        }

        buckets
    }

    pub fn extract_images(document: &Html) -> Vec<ImageInfo> {
        document
            .select(&selectors().image)
            .map(|img| {
                let alt = img.value().attr("alt").map(str::to_string);
                ImageInfo {
                    has_alt: alt.as_deref().is_some_and(|a| !a.is_empty()),
                    alt,
                    lazy_loaded: img.value().attr("loading") == Some("lazy"),
                }
            })
            .collect()
    }

    pub fn extract_post_stats(document: &Html) -> PostStats {
        let mut total = 0;
        let mut word_counts = Vec::new();

        for selector in &selectors().posts {
            let matched: Vec<ElementRef> = document.select(selector).collect();
            total += matched.len();
            word_counts.extend(
                matched
                    .iter()
                    .map(|el| count_words(&el.text().collect::<String>())),
            );
        }

        if word_counts.is_empty() {
            return PostStats {
                total,
                ..Default::default()
            };
        }

        let sum: usize = word_counts.iter().sum();
        PostStats {
            total,
            average_words: (sum as f64 / word_counts.len() as f64).round() as usize,
            longest: word_counts.iter().copied().max().unwrap_or(0),
            shortest: word_counts.iter().copied().min().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://blog.example.com/post").unwrap()
    }

    #[test]
    fn test_link_classification() {
        let html = r#"
            <html><body>
                <a href="https://blog.example.com/about">About</a>
                <a href="https://blog.example.com/contact">Contact</a>
                <a href="https://www.facebook.com/page">FB</a>
                <a href="https://YouTube.com/channel">YT</a>
                <a href="https://other.org/ref">Ref</a>
                <a href="http://insecure.net/">Old</a>
                <a href="/relative">Relative</a>
                <a href="mailto:me@example.com">Mail</a>
                <a>No href</a>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let links = PageExtractor::extract_links(&doc, &page_url());

        assert_eq!(links.internal.len(), 2);
        assert_eq!(links.social.len(), 2);
        assert_eq!(links.external.len(), 2);
        assert_eq!(links.outbound().len(), 2);
    }

    #[test]
    fn test_post_selectors_double_count_overlapping_matches() {
        // The article matches "article" and ".post"; the div matches ".post"
        // and "[class*=post-]" (via "post-item"), and ".post-item".
        let html = r#"
            <html><body>
                <article class="post">one two three four</article>
                <div class="post post-item">five six</div>
            </body></html>
        "#;
        let doc = Html::parse_document(html);
        let stats = PageExtractor::extract_post_stats(&doc);

        // article: 1, .post: 2, .post-item: 1, [class*="post-"]: 1
        assert_eq!(stats.total, 5);
        assert_eq!(stats.longest, 4);
        assert_eq!(stats.shortest, 2);
        // (4 + 4 + 2 + 2 + 2) / 5 = 2.8
        assert_eq!(stats.average_words, 3);
    }

    #[test]
    fn test_no_posts_yields_zero_stats() {
        let doc = Html::parse_document("<html><body><p>Hello</p></body></html>");
        assert_eq!(PageExtractor::extract_post_stats(&doc), PostStats::default());
    }

    #[test]
    fn test_extract_full_metadata() {
        let html = r#"<!DOCTYPE html>
            <html lang="en">
            <head>
                <title>  A Reasonably Long Title For Testing Purposes  </title>
                <meta name="description" content="Short description">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <link rel="canonical" href="https://blog.example.com/post">
                <meta property="og:title" content="x">
                <link rel="icon" href="/favicon.ico">
                <script async src="https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js"></script>
            </head>
            <body>
                <h1>Main</h1><h2>Sub</h2><h3>Third</h3>
                <p>First sentence. Second sentence!</p>
                <p>Subscribe to our newsletter? Read our privacy policy.</p>
                <img src="a.png" alt="A" loading="lazy"><img src="b.png">
                <form><input type="search"></form>
            </body></html>"#;
        let meta = PageExtractor::extract(html, &page_url());

        assert_eq!(meta.title, "A Reasonably Long Title For Testing Purposes");
        assert_eq!(meta.meta_description, "Short description");
        assert_eq!(meta.h1_count, 1);
        assert_eq!(meta.h2_count, 1);
        assert_eq!(meta.total_headings, 3);
        assert_eq!(meta.paragraph_count, 2);
        assert_eq!(meta.image_count, 2);
        assert!(meta.images[0].has_alt && meta.images[0].lazy_loaded);
        assert!(!meta.images[1].has_alt);
        assert_eq!(meta.forms_count, 1);
        assert!(meta.has_search_box);
        assert!(meta.has_newsletter);
        assert!(meta.has_privacy_policy);
        assert!(!meta.has_terms);
        assert!(meta.has_ssl);
        assert!(meta.has_open_graph);
        assert!(!meta.has_twitter_card);
        assert!(meta.has_favicon);
        assert!(meta.has_adsense);
        assert!(meta.lazy_loading);
        assert!(!meta.has_mixed_content);
        assert_eq!(meta.viewport.as_deref(), Some("width=device-width, initial-scale=1"));
        assert_eq!(meta.canonical.as_deref(), Some("https://blog.example.com/post"));
        assert_eq!(meta.language, "en");
        assert_eq!(meta.html_size, html.len());
        assert!(meta.sentence_count >= 4);
    }

    #[test]
    fn test_extract_empty_document() {
        let meta = PageExtractor::extract("", &Url::parse("http://example.com").unwrap());
        assert_eq!(meta.word_count, 0);
        assert_eq!(meta.sentence_count, 0);
        assert_eq!(meta.avg_words_per_sentence, 0);
        assert_eq!(meta.language, "not specified");
        assert!(!meta.has_ssl);
        assert!(meta.viewport.is_none());
        assert_eq!(meta.html_size, 0);
    }
}
