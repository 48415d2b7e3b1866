pub mod analyzer;
pub mod cache;
pub mod fetcher;
pub mod http;
pub mod insights;
pub mod resources;

pub use analyzer::Analyzer;
pub use cache::{cache_key, AnalysisCache, InMemoryCache};
pub use fetcher::{FetchedPage, HttpFetcher, PageSource};
pub use insights::{GeminiInsights, InsightProvider, OpenAiInsights};
pub use resources::{AdsTxtProbe, ResourceChecker, ResourceStatus};
