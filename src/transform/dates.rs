//! Publish-time normalization
//!
//! Source exports carry times like `2025年06月27日19:38:27`, sometimes buried in
//! leftover page script. Everything is normalized to `YYYY-MM-DD HH:MM:SS`.

use crate::clock::Clock;
use crate::config::DateFallback;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use tracing::{debug, warn};

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Unanchored so that bylines and script fragments around the date are skipped
static CJK_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日\s*([0-9]{1,2}):([0-9]{1,2})(?::([0-9]{1,2}))?").unwrap()
});

static NUMERIC_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})[-/]([0-9]{1,2})[-/]([0-9]{1,2})[ T]+([0-9]{1,2}):([0-9]{1,2})(?::([0-9]{1,2}))?").unwrap()
});

/// Parse a source publish time. Seconds default to zero when absent.
///
/// Returns `None` when no date-time pattern is found or the numbers do not
/// form a valid calendar date and time.
pub fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    let caps = CJK_DATETIME_REGEX
        .captures(raw)
        .or_else(|| NUMERIC_DATETIME_REGEX.captures(raw))?;
    datetime_from_captures(&caps)
}

fn datetime_from_captures(caps: &Captures) -> Option<NaiveDateTime> {
    let number = |idx: usize| caps.get(idx).map(|m| m.as_str().parse::<u32>().ok());

    let year = number(1)?? as i32;
    let month = number(2)??;
    let day = number(3)??;
    let hour = number(4)??;
    let minute = number(5)??;
    let second = number(6).unwrap_or(Some(0))?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Normalize a source publish time, substituting a fallback when it cannot be
/// parsed. Never fails.
pub fn normalize_published_at<C, R>(
    raw: &str,
    fallback: DateFallback,
    fallback_max_days: i64,
    clock: &C,
    rng: &mut R,
) -> String
where
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    let parsed = match parse_published_at(raw) {
        Some(datetime) => datetime,
        None => {
            if raw.trim().is_empty() {
                debug!("no publish time, using fallback");
            } else {
                warn!(raw = %raw, "unparseable publish time, using fallback");
            }
            fallback_datetime(fallback, fallback_max_days, clock, rng)
        }
    };
    parsed.format(DATETIME_FORMAT).to_string()
}

fn fallback_datetime<C, R>(fallback: DateFallback, max_days: i64, clock: &C, rng: &mut R) -> NaiveDateTime
where
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    let now = clock.now();
    match fallback {
        DateFallback::Now => now,
        DateFallback::Random => {
            let days = rng.gen_range(1..=max_days.max(1));
            now - Duration::days(days)
        }
    }
}
