//! Reading-time estimation for article content.

use super::Language;
use crate::content::text::strip_html;

/// Number of words in an HTML fragment after tags are stripped.
pub fn word_count(html: &str) -> usize {
    strip_html(html).split_whitespace().count()
}

/// Estimated reading time in whole minutes, rounded up.
///
/// Empty content yields 0.
pub fn estimate_minutes(html: &str, language: Language) -> i32 {
    let words = word_count(html);
    let wpm = language.words_per_minute();
    ((words + wpm - 1) / wpm) as i32
}
