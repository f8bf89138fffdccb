//! Record transformation
//!
//! Every source record is converted on its own; [`NewsConverter`] runs the
//! per-field steps below and assembles the normalized record:
//!
//! - [`classify`]: keyword-count category
//! - [`summary`]: extractive summary
//! - [`dates`]: publish-time normalization with fallback
//! - [`engagement`]: synthetic counters and hotness score
//! - [`identity`]: guid and source name

pub mod classify;
pub mod converter;
pub mod dates;
pub mod engagement;
pub mod identity;
pub mod summary;
pub mod text;

pub use classify::{category_scores, classify as classify_category};
pub use converter::{BatchOutcome, BatchReport, NewsConverter};
pub use dates::{normalize_published_at, parse_published_at, DATETIME_FORMAT};
pub use engagement::{hotness_score, synthesize_stats};
pub use identity::{generate_guid, source_from_link};
pub use summary::generate_summary;
