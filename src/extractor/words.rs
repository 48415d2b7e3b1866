//! Script-aware word counting.
//!
//! Whitespace tokenisation undercounts scripts written without spaces, so
//! CJK and Arabic text is approximated from its character count instead.

use regex::Regex;
use std::sync::OnceLock;

/// Average characters per word assumed for CJK / Hangul text.
const CJK_CHARS_PER_WORD: f64 = 2.5;
/// Average characters per word assumed for Arabic text.
const ARABIC_CHARS_PER_WORD: f64 = 4.5;

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fa5}'
        | '\u{3000}'..='\u{303f}'
        | '\u{3040}'..='\u{309f}'
        | '\u{30a0}'..='\u{30ff}'
        | '\u{ac00}'..='\u{d7af}'
        | '\u{1100}'..='\u{11ff}')
}

fn is_arabic(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06ff}'
        | '\u{0750}'..='\u{077f}'
        | '\u{08a0}'..='\u{08ff}')
}

/// Dominant script of a piece of text, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Cjk,
    Arabic,
    Spaced,
}

pub fn detect_script(text: &str) -> Script {
    if text.chars().any(is_cjk) {
        Script::Cjk
    } else if text.chars().any(is_arabic) {
        Script::Arabic
    } else {
        Script::Spaced
    }
}

/// Strip markup, collapse whitespace and trim.
fn clean(text: &str) -> String {
    let stripped = tag_pattern().replace_all(text, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count words in arbitrary text.
pub fn count_words(text: &str) -> usize {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return 0;
    }

    let chars = cleaned.chars().count() as f64;
    match detect_script(&cleaned) {
        Script::Cjk => (chars / CJK_CHARS_PER_WORD).round() as usize,
        Script::Arabic => (chars / ARABIC_CHARS_PER_WORD).round() as usize,
        Script::Spaced => cleaned.split_whitespace().count(),
    }
}
