//! Synthetic engagement counters and hotness scoring

use crate::config::{HotnessConfig, HotnessWeights, StatsPolicy};
use crate::transform::dates::DATETIME_FORMAT;
use crate::types::EngagementStats;
use chrono::NaiveDateTime;
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::warn;

pub const VIEW_RANGE: RangeInclusive<u64> = 100..=10_000;

/// Score range used when the publish time of a decayed score cannot be read
pub const FALLBACK_SCORE_RANGE: RangeInclusive<f64> = 10.0..=1000.0;

/// Lowest time-decay factor
pub const MIN_DECAY: f64 = 0.1;

const SECONDS_PER_DAY: i64 = 86_400;

/// Draw placeholder engagement counters.
pub fn synthesize_stats<R: Rng + ?Sized>(policy: StatsPolicy, rng: &mut R) -> EngagementStats {
    let view_count = rng.gen_range(VIEW_RANGE);
    match policy {
        StatsPolicy::Independent => EngagementStats {
            view_count,
            like_count: rng.gen_range(10..=1000),
            comment_count: rng.gen_range(5..=500),
            share_count: rng.gen_range(0..=200),
        },
        StatsPolicy::Proportional => {
            let share_of = |fraction: f64| (view_count as f64 * fraction) as u64;
            EngagementStats {
                view_count,
                like_count: rng.gen_range(share_of(0.01)..=share_of(0.1)),
                comment_count: rng.gen_range(0..=share_of(0.05)),
                share_count: rng.gen_range(0..=share_of(0.02)),
            }
        }
    }
}

/// Weighted sum of the counters, before decay and rounding
pub fn weighted_score(stats: &EngagementStats, weights: &HotnessWeights) -> f64 {
    stats.view_count as f64 * weights.view
        + stats.like_count as f64 * weights.like
        + stats.comment_count as f64 * weights.comment
        + stats.share_count as f64 * weights.share
}

/// `max(0.1, 1 - 0.1 * days_old)`, with days counted as whole elapsed days
pub fn decay_factor(published_at: NaiveDateTime, now: NaiveDateTime) -> f64 {
    let days_old = (now - published_at).num_seconds().div_euclid(SECONDS_PER_DAY);
    (1.0 - 0.1 * days_old as f64).max(MIN_DECAY)
}

/// Compute the hotness score of a record.
///
/// With time decay enabled, `published_at` must be in `YYYY-MM-DD HH:MM:SS`
/// form. If it is not, a random score from [`FALLBACK_SCORE_RANGE`] is used.
pub fn hotness_score<R: Rng + ?Sized>(
    stats: &EngagementStats,
    config: &HotnessConfig,
    published_at: &str,
    now: NaiveDateTime,
    rng: &mut R,
) -> f64 {
    let base = weighted_score(stats, &config.weights);
    if !config.time_decay {
        return round_to(base, config.precision);
    }

    match NaiveDateTime::parse_from_str(published_at, DATETIME_FORMAT) {
        Ok(published) => round_to(base * decay_factor(published, now), config.precision),
        Err(err) => {
            warn!(published_at = %published_at, error = %err, "cannot age record, using random hotness");
            round_to(rng.gen_range(FALLBACK_SCORE_RANGE), config.precision)
        }
    }
}

pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn stats(view: u64, like: u64, comment: u64, share: u64) -> EngagementStats {
        EngagementStats {
            view_count: view,
            like_count: like,
            comment_count: comment,
            share_count: share,
        }
    }

    #[test]
    fn test_article_weighting() {
        let config = HotnessConfig {
            weights: HotnessWeights::ARTICLE,
            time_decay: false,
            precision: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let score = hotness_score(&stats(100, 10, 5, 0), &config, "", at(1, 0), &mut rng);
        assert_eq!(score, 45.0);
    }

    #[test]
    fn test_sheet_weighting_with_decay() {
        let config = HotnessConfig {
            weights: HotnessWeights::SHEET,
            time_decay: true,
            precision: 2,
        };
        let mut rng = StdRng::seed_from_u64(1);
        // 100 + 50 + 15 + 20 = 185, two days old -> 0.8
        let score = hotness_score(&stats(100, 10, 5, 2), &config, "2025-07-03 08:00:00", at(5, 9), &mut rng);
        assert_eq!(score, 148.0);
    }

    #[test]
    fn test_decay_floor() {
        assert_eq!(decay_factor(at(1, 0), at(1, 23)), 1.0);
        assert!((decay_factor(at(1, 0), at(4, 0)) - 0.7).abs() < 1e-9);
        assert_eq!(decay_factor(at(1, 0), at(30, 0)), MIN_DECAY);
    }

    #[test]
    fn test_unparseable_date_gives_random_score_in_range() {
        let config = HotnessConfig {
            weights: HotnessWeights::SHEET,
            time_decay: true,
            precision: 2,
        };
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let score = hotness_score(&stats(1, 1, 1, 1), &config, "not a date", at(1, 0), &mut rng);
            assert!(FALLBACK_SCORE_RANGE.contains(&score));
        }
    }

    #[test]
    fn test_independent_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let s = synthesize_stats(StatsPolicy::Independent, &mut rng);
            assert!(VIEW_RANGE.contains(&s.view_count));
            assert!((10..=1000).contains(&s.like_count));
            assert!((5..=500).contains(&s.comment_count));
            assert!(s.share_count <= 200);
        }
    }

    #[test]
    fn test_proportional_ranges() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            let s = synthesize_stats(StatsPolicy::Proportional, &mut rng);
            let views = s.view_count as f64;
            assert!(s.like_count >= (views * 0.01) as u64);
            assert!(s.like_count <= (views * 0.1) as u64);
            assert!(s.comment_count <= (views * 0.05) as u64);
            assert!(s.share_count <= (views * 0.02) as u64);
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(12.346, 2), 12.35);
    }
}
