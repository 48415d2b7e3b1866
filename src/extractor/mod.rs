//! HTML extraction: word counting and the page metadata record.

pub mod page_extractor;
pub mod words;

pub use page_extractor::{LinkBuckets, PageExtractor, PostStats, POST_SELECTORS};
pub use words::count_words;
