use crate::clock::{Clock, SystemClock};
use crate::config::{
    AuthorPolicy, CategoryPolicy, ConvertConfig, EmptyBodyPolicy, GuidPolicy, SummaryPolicy, TagPolicy,
};
use crate::error::RecordError;
use crate::source::{SourceField, SourceRecord};
use crate::transform::classify::classify;
use crate::transform::dates::normalize_published_at;
use crate::transform::engagement::{hotness_score, synthesize_stats};
use crate::transform::identity::{generate_guid, source_from_link, UNKNOWN_SOURCE};
use crate::transform::summary::generate_summary;
use crate::transform::text::tidy_text;
use crate::types::{Category, NormalizedRecord, SourceType, Status};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use tracing::{error, info, warn};

/// Generic newsroom bylines used by [`AuthorPolicy::RandomByline`]
pub const DEFAULT_BYLINES: &[&str] = &["记者", "编辑", "通讯员", "特约记者"];

pub const HOT_TAG: &str = "热点";

/// Pool drawn from by [`TagPolicy::Sampled`]
pub const EXTRA_TAGS: &[&str] = &["热点", "新闻", "重要", "关注"];

/// Counts for one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {}, converted {}, skipped {}, failed {}",
            self.processed, self.succeeded, self.skipped, self.failed
        )
    }
}

/// Converted records of a batch, in input order
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub records: Vec<NormalizedRecord>,
    pub report: BatchReport,
}

/// Converts source records into [`NormalizedRecord`]s.
///
/// The clock and random generator are owned by the converter so a fixed clock
/// and a seeded generator make the output fully reproducible.
pub struct NewsConverter<C: Clock = SystemClock> {
    config: ConvertConfig,
    clock: C,
    rng: RefCell<StdRng>,
}

impl NewsConverter<SystemClock> {
    pub fn new(config: ConvertConfig) -> Self {
        NewsConverter::with_parts(config, SystemClock, StdRng::from_entropy())
    }

    pub fn seeded(config: ConvertConfig, seed: u64) -> Self {
        NewsConverter::with_parts(config, SystemClock, StdRng::seed_from_u64(seed))
    }
}

impl<C: Clock> NewsConverter<C> {
    pub fn with_parts(config: ConvertConfig, clock: C, rng: StdRng) -> Self {
        NewsConverter {
            config,
            clock,
            rng: RefCell::new(rng),
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Convert every item, skipping and logging the ones that fail.
    pub fn convert_batch(&self, items: Vec<Value>) -> BatchOutcome {
        let mut records = Vec::with_capacity(items.len());
        let mut report = BatchReport::default();

        for (idx, item) in items.into_iter().enumerate() {
            report.processed += 1;
            let label = record_label(&item, idx);

            match self.convert_value(item) {
                Ok(record) => {
                    info!(record = %label, category = %record.category, "converted");
                    report.succeeded += 1;
                    records.push(record);
                }
                Err(err) if err.is_skip() => {
                    warn!(record = %label, reason = %err, "skipped");
                    report.skipped += 1;
                }
                Err(err) => {
                    error!(record = %label, error = %err, "conversion failed");
                    report.failed += 1;
                }
            }
        }

        BatchOutcome { records, report }
    }

    pub fn convert_value(&self, item: Value) -> Result<NormalizedRecord, RecordError> {
        let record = SourceRecord::try_from(item)?;
        self.convert_item(&record)
    }

    /// Convert a single source record.
    pub fn convert_item(&self, record: &SourceRecord) -> Result<NormalizedRecord, RecordError> {
        let body = record.text(SourceField::Body);
        if body.trim().is_empty() && self.config.empty_body == EmptyBodyPolicy::Skip {
            return Err(RecordError::EmptyBody);
        }

        let mut rng = self.rng.borrow_mut();
        let rng = &mut *rng;

        let title = self.tidy(record.text(SourceField::Title));
        let content = self.tidy(body);
        let keyword = record.non_blank(SourceField::Keyword).map(|k| k.trim().to_string());

        let category = match self.config.category {
            CategoryPolicy::Classify => classify(&title, &content),
            CategoryPolicy::PreferKeyword => keyword
                .as_deref()
                .and_then(Category::from_label)
                .unwrap_or_else(|| classify(&title, &content)),
        };

        let summary = match self.config.summary {
            SummaryPolicy::Generate => None,
            SummaryPolicy::PreferSource => record.non_blank(SourceField::Summary).map(|s| self.tidy(s)),
        }
        .unwrap_or_else(|| generate_summary(&content, self.config.summary_max_chars));

        let link = record.text(SourceField::Link).trim().to_string();
        let source = record
            .non_blank(SourceField::Source)
            .map(|s| s.trim().to_string())
            .or_else(|| source_from_link(&link))
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        let published_at = normalize_published_at(
            &record.text(SourceField::PublishedAt),
            self.config.date_fallback,
            self.config.fallback_max_days,
            &self.clock,
            rng,
        );

        let stats = synthesize_stats(self.config.stats, rng);
        let hotness = hotness_score(&stats, &self.config.hotness, &published_at, self.clock.now(), rng);

        let guid = match self.config.guid {
            GuidPolicy::Salted => {
                let salt = self.clock.now().format("%Y-%m-%dT%H:%M:%S%.f").to_string();
                generate_guid(&title, &source, Some(&salt))
            }
            GuidPolicy::Stable => generate_guid(&title, &source, None),
        };

        let author = match self.config.author {
            AuthorPolicy::RandomByline => DEFAULT_BYLINES.choose(rng).copied().unwrap_or_default(),
            AuthorPolicy::Blank => "",
        };

        let tags = build_tags(keyword.as_deref(), category, self.config.tags, rng);

        Ok(NormalizedRecord {
            title,
            content,
            description: summary.clone(),
            summary,
            source,
            category,
            published_at,
            created_by: None,
            is_active: true,
            source_type: SourceType::Manual,
            rss_source_id: None,
            link,
            guid,
            author: author.to_string(),
            image_url: record.text(SourceField::Image).trim().to_string(),
            tags,
            language: self.config.language.clone(),
            view_count: stats.view_count,
            like_count: stats.like_count,
            comment_count: stats.comment_count,
            share_count: stats.share_count,
            hotness_score: hotness,
            status: Status::Published,
            is_processed: true,
        })
    }

    fn tidy(&self, text: String) -> String {
        if self.config.normalize_text {
            tidy_text(&text)
        } else {
            text
        }
    }
}

/// Assemble the tag list and encode it as a JSON array string.
fn build_tags<R: Rng + ?Sized>(keyword: Option<&str>, category: Category, policy: TagPolicy, rng: &mut R) -> String {
    let mut tags: Vec<String> = Vec::with_capacity(4);
    let mut push = |tag: &str| {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    };

    if let Some(keyword) = keyword {
        push(keyword);
    }
    push(category.label());

    match policy {
        TagPolicy::Hot => push(HOT_TAG),
        TagPolicy::Sampled => {
            let extra = rng.gen_range(0..=2);
            for tag in EXTRA_TAGS.choose_multiple(rng, extra) {
                push(*tag);
            }
        }
    }

    Value::from(tags).to_string()
}

/// Title of an item for log lines, or its 1-based position
fn record_label(item: &Value, idx: usize) -> String {
    SourceField::Title
        .keys()
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str))
        .filter(|title| !title.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("record #{}", idx + 1))
}
