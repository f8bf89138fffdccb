//! Conversion settings
//!
//! The two source layouts this tool handles disagree on several details
//! (date fallback, stat synthesis, tags, output shape). Each disagreement is a
//! named policy here, and [`Preset`] bundles the combination used by each
//! layout.

use strum::{Display, EnumString};

/// Source layout a configuration is tuned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Preset {
    /// Flat article export: `[{"标题": .., "正文": ..}]`
    #[default]
    Article,
    /// Spreadsheet export: `{"Sheet1": [{"关键词": .., "标题": ..}]}`
    Sheet,
}

/// What to use as `published_at` when the source date cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DateFallback {
    /// The current instant
    Now,
    /// The current instant minus a random number of whole days
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsPolicy {
    /// Every counter drawn from its own fixed range
    Independent,
    /// Likes, comments and shares drawn as fractions of the view count
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyBodyPolicy {
    /// Reject records whose body is empty or whitespace
    Skip,
    /// Emit them with empty content
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// Keyword scoring over title and body
    Classify,
    /// Use the record's keyword cell when it names a known category
    PreferKeyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPolicy {
    Generate,
    /// Use the record's own summary cell when it is not blank
    PreferSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorPolicy {
    /// Pick one of the generic newsroom bylines
    RandomByline,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
    /// keyword, category and the "热点" tag
    Hot,
    /// keyword, category and up to two random extra tags
    Sampled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidPolicy {
    /// Hash title and source together with the conversion instant.
    /// Re-running produces different guids.
    Salted,
    /// Hash title and source only, so re-imports are idempotent.
    Stable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputLayout {
    /// Bare JSON array of records
    #[default]
    Array,
    /// `{"news_items": [..], "total_count": .., "conversion_time": .., "source_file": ..}`
    Envelope,
}

/// Linear weights applied to engagement counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotnessWeights {
    pub view: f64,
    pub like: f64,
    pub comment: f64,
    pub share: f64,
}

impl HotnessWeights {
    pub const ARTICLE: HotnessWeights = HotnessWeights {
        view: 0.1,
        like: 2.0,
        comment: 3.0,
        share: 5.0,
    };

    pub const SHEET: HotnessWeights = HotnessWeights {
        view: 1.0,
        like: 5.0,
        comment: 3.0,
        share: 10.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotnessConfig {
    pub weights: HotnessWeights,

    /// Scale the score down by 10% per day of age, floored at 10%
    pub time_decay: bool,

    /// Decimal digits kept after rounding
    pub precision: u32,
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub preset: Preset,
    pub empty_body: EmptyBodyPolicy,
    pub date_fallback: DateFallback,

    /// Upper bound of the day offset used by [`DateFallback::Random`] (lower bound is 1)
    pub fallback_max_days: i64,
    pub stats: StatsPolicy,
    pub hotness: HotnessConfig,
    pub category: CategoryPolicy,
    pub summary: SummaryPolicy,

    /// Character budget of generated summaries
    pub summary_max_chars: usize,
    pub author: AuthorPolicy,
    pub tags: TagPolicy,
    pub guid: GuidPolicy,

    /// Collapse newlines and trim title, content and summary
    pub normalize_text: bool,
    pub layout: OutputLayout,

    /// Object keys that hold the record array in spreadsheet exports
    pub sheet_keys: Vec<String>,
    pub language: String,
}

impl ConvertConfig {
    pub fn preset(preset: Preset) -> Self {
        let base = ConvertConfig {
            preset,
            empty_body: EmptyBodyPolicy::Skip,
            date_fallback: DateFallback::Now,
            fallback_max_days: 30,
            stats: StatsPolicy::Independent,
            hotness: HotnessConfig {
                weights: HotnessWeights::ARTICLE,
                time_decay: false,
                precision: 1,
            },
            category: CategoryPolicy::Classify,
            summary: SummaryPolicy::Generate,
            summary_max_chars: 200,
            author: AuthorPolicy::RandomByline,
            tags: TagPolicy::Hot,
            guid: GuidPolicy::Salted,
            normalize_text: false,
            layout: OutputLayout::Array,
            sheet_keys: vec![String::from("Sheet1")],
            language: String::from("zh"),
        };

        match preset {
            Preset::Article => base,
            Preset::Sheet => ConvertConfig {
                date_fallback: DateFallback::Random,
                stats: StatsPolicy::Proportional,
                hotness: HotnessConfig {
                    weights: HotnessWeights::SHEET,
                    time_decay: true,
                    precision: 2,
                },
                category: CategoryPolicy::PreferKeyword,
                summary: SummaryPolicy::PreferSource,
                author: AuthorPolicy::Blank,
                tags: TagPolicy::Sampled,
                normalize_text: true,
                layout: OutputLayout::Envelope,
                ..base
            },
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig::preset(Preset::Article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_skip_policy() {
        assert_eq!(ConvertConfig::preset(Preset::Article).empty_body, EmptyBodyPolicy::Skip);
        assert_eq!(ConvertConfig::preset(Preset::Sheet).empty_body, EmptyBodyPolicy::Skip);
    }

    #[test]
    fn test_sheet_preset_overrides() {
        let config = ConvertConfig::preset(Preset::Sheet);
        assert_eq!(config.stats, StatsPolicy::Proportional);
        assert_eq!(config.hotness.weights, HotnessWeights::SHEET);
        assert!(config.hotness.time_decay);
        assert_eq!(config.layout, OutputLayout::Envelope);
        assert_eq!(config.summary_max_chars, 200);
    }

    #[test]
    fn test_cli_names_parse() {
        assert_eq!("sheet".parse::<Preset>().unwrap(), Preset::Sheet);
        assert_eq!("random".parse::<DateFallback>().unwrap(), DateFallback::Random);
        assert_eq!("envelope".parse::<OutputLayout>().unwrap(), OutputLayout::Envelope);
        assert!("yaml".parse::<OutputLayout>().is_err());
    }
}
