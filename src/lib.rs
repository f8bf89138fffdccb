//! # Newsprint - news export normalizer
//!
//! Converts loosely-structured news exports (Chinese column names, free-form
//! publish times, spreadsheet sheets) into rows of a normalized `news` table,
//! and renders them as JSON or as a SQL insert script.
//!
//! ## Modules
//!
//! - **loader**: read an export (array, single object, or sheet object)
//! - **transform**: per-record conversion (category, summary, dates, stats)
//! - **writer**: JSON documents and `INSERT INTO news` scripts
//!
//! ## Quick Start
//!
//! ```rust
//! use newsprint::{ConvertConfig, NewsConverter};
//! use serde_json::json;
//!
//! let converter = NewsConverter::seeded(ConvertConfig::default(), 7);
//! let outcome = converter.convert_batch(vec![
//!     json!({"标题": "股市收盘", "正文": "股市今日上涨。", "发布时间": "2025年07月01日19:01"}),
//!     json!({"标题": "空文", "正文": ""}),
//! ]);
//!
//! assert_eq!(outcome.records.len(), 1);
//! assert_eq!(outcome.records[0].published_at, "2025-07-01 19:01:00");
//! assert_eq!(outcome.report.skipped, 1);
//! ```

use std::path::Path;
use tracing::info;

pub mod clock;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;
pub mod transform;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConvertConfig, DateFallback, EmptyBodyPolicy, GuidPolicy, OutputLayout, Preset};
pub use error::{ConvertError, RecordError};
pub use loader::load_records;
pub use source::{SourceField, SourceRecord};
pub use transform::{BatchOutcome, BatchReport, NewsConverter};
pub use types::{Category, EngagementStats, NormalizedRecord, SourceType, Status};
pub use writer::{read_converted, write_json, write_sql, OutputMeta, SqlWriter};

/// Timestamp format of `conversion_time` and SQL script headers
pub const CONVERSION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Main entry point: convert an export file and write the normalized output.
///
/// The JSON document is always written. When `sql_output` is given, an insert
/// script for the same records is written too. Record-level problems are
/// logged and counted in the returned report; only unreadable input or
/// unwritable output is an error.
pub fn convert_file<C: Clock>(
    converter: &NewsConverter<C>,
    input: &Path,
    output: &Path,
    sql_output: Option<&Path>,
) -> Result<BatchReport, ConvertError> {
    let config = converter.config();
    let items = load_records(input, &config.sheet_keys)?;
    let outcome = converter.convert_batch(items);

    let meta = OutputMeta {
        conversion_time: converter.clock().now().format(CONVERSION_TIME_FORMAT).to_string(),
        source_file: input.display().to_string(),
    };

    writer::write_atomically(output, |w| write_json(w, &outcome.records, config.layout, &meta))?;
    info!(path = %output.display(), records = outcome.records.len(), "wrote JSON output");

    if let Some(sql_output) = sql_output {
        writer::write_atomically(sql_output, |w| {
            write_sql(w, &outcome.records, &meta.conversion_time).map(|_| ())
        })?;
        info!(path = %sql_output.display(), statements = outcome.records.len(), "wrote SQL script");
    }

    Ok(outcome.report)
}
