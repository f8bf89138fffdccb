//! Extractive summaries

use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_SUMMARY_CHARS: usize = 200;

/// Appended to raw-prefix summaries
pub const TRUNCATION_MARKER: &str = "...";

/// Appended to every extracted sentence
pub const SENTENCE_MARKER: char = '。';

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// 【来源】-style editorial annotations
static ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"【.*?】").unwrap());

static SENTENCE_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。！？!?]").unwrap());

/// Build a summary of at most `max_chars` characters from the leading sentences
/// of `content`.
///
/// Whitespace and `【...】` annotations are removed first. When not even the
/// first sentence fits, the first `max_chars` characters of the raw content are
/// returned with [`TRUNCATION_MARKER`] appended.
pub fn generate_summary(content: &str, max_chars: usize) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let cleaned = WHITESPACE_REGEX.replace_all(content, "");
    let cleaned = ANNOTATION_REGEX.replace_all(&cleaned, "");

    let mut summary = String::new();
    let mut summary_chars = 0;
    for sentence in SENTENCE_END_REGEX.split(&cleaned) {
        if sentence.is_empty() {
            break;
        }
        let added = sentence.chars().count() + 1;
        if summary_chars + added > max_chars {
            break;
        }
        summary.push_str(sentence);
        summary.push(SENTENCE_MARKER);
        summary_chars += added;
    }

    if summary.is_empty() {
        truncate_with_marker(content, max_chars)
    } else {
        summary.trim_end().to_string()
    }
}

fn truncate_with_marker(content: &str, max_chars: usize) -> String {
    let mut out: String = content.chars().take(max_chars).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sentence_within_budget() {
        let summary = generate_summary("今天天气晴朗。", DEFAULT_SUMMARY_CHARS);
        assert_eq!(summary, "今天天气晴朗。");
        assert!(!summary.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn test_unterminated_sentence_gets_marker() {
        assert_eq!(generate_summary("今天天气晴朗", DEFAULT_SUMMARY_CHARS), "今天天气晴朗。");
    }

    #[test]
    fn test_greedy_stops_at_budget() {
        let summary = generate_summary("一二三。四五六！七八九？", 8);
        assert_eq!(summary, "一二三。四五六。");
    }

    #[test]
    fn test_whitespace_and_annotations_removed() {
        let summary = generate_summary("【新华社】 北京 电 ，会议召开。\n 后续报道。", DEFAULT_SUMMARY_CHARS);
        assert_eq!(summary, "北京电，会议召开。后续报道。");
    }

    #[test]
    fn test_long_unbroken_text_truncated() {
        let content = "字".repeat(300);
        let summary = generate_summary(&content, DEFAULT_SUMMARY_CHARS);
        assert!(summary.ends_with(TRUNCATION_MARKER));
        assert!(summary.chars().count() <= DEFAULT_SUMMARY_CHARS + TRUNCATION_MARKER.len());
        assert_eq!(summary.chars().count(), 203);
    }

    #[test]
    fn test_blank_content() {
        assert_eq!(generate_summary("  \n ", DEFAULT_SUMMARY_CHARS), "");
    }
}
