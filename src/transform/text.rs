use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAKS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

/// Unify line endings, drop blank lines and trim.
pub fn tidy_text(text: &str) -> String {
    LINE_BREAKS_REGEX.replace_all(text, "\n").trim().to_string()
}
