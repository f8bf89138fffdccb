//! newsprint-convert: Normalize a news export into `news` table records
//!
//! Usage:
//!   # Article export with default paths (sourcenews.json -> data/converted_news.json)
//!   newsprint-convert
//!
//!   # Spreadsheet export, enveloped output plus an insert script
//!   newsprint-convert --preset sheet localization.json \
//!       -o converted_news_data.json --sql insert_news_data.sql
//!
//!   # Reproducible run
//!   newsprint-convert --seed 42 --stable-guid sourcenews.json

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use newsprint::{
    convert_file, ConvertConfig, DateFallback, EmptyBodyPolicy, GuidPolicy, NewsConverter, OutputLayout, Preset,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "newsprint-convert")]
#[command(about = "Convert news exports into normalized news records", long_about = None)]
struct Args {
    /// Source export (JSON array, object, or sheet object)
    #[arg(value_name = "FILE", default_value = "sourcenews.json")]
    input: PathBuf,

    /// Output JSON document
    #[arg(long, short = 'o', default_value = "data/converted_news.json")]
    output: PathBuf,

    /// Also write an SQL insert script to this path
    #[arg(long)]
    sql: Option<PathBuf>,

    /// Source layout: article or sheet
    #[arg(long, default_value = "article")]
    preset: Preset,

    /// Output layout: array or envelope (default depends on preset)
    #[arg(long)]
    layout: Option<OutputLayout>,

    /// Fallback for unparseable publish times: now or random (default depends on preset)
    #[arg(long)]
    date_fallback: Option<DateFallback>,

    /// Emit records whose body is empty instead of skipping them
    #[arg(long)]
    keep_empty_body: bool,

    /// Derive guids from title and source only, so re-runs produce the same ids
    #[arg(long)]
    stable_guid: bool,

    /// Seed for the synthetic statistics
    #[arg(long)]
    seed: Option<u64>,

    /// Summary length budget in characters (default: 200)
    #[arg(long)]
    summary_chars: Option<usize>,

    /// Object key holding the records of a sheet export (repeatable, default: Sheet1)
    #[arg(long = "sheet-key", value_name = "KEY")]
    sheet_keys: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    // Build config
    let mut config = ConvertConfig::preset(args.preset);
    if let Some(layout) = args.layout {
        config.layout = layout;
    }
    if let Some(fallback) = args.date_fallback {
        config.date_fallback = fallback;
    }
    if args.keep_empty_body {
        config.empty_body = EmptyBodyPolicy::Keep;
    }
    if args.stable_guid {
        config.guid = GuidPolicy::Stable;
    }
    if let Some(chars) = args.summary_chars {
        config.summary_max_chars = chars;
    }
    if !args.sheet_keys.is_empty() {
        config.sheet_keys = args.sheet_keys;
    }

    let converter = match args.seed {
        Some(seed) => NewsConverter::seeded(config, seed),
        None => NewsConverter::new(config),
    };

    info!(input = %args.input.display(), output = %args.output.display(), preset = %args.preset, "starting conversion");

    let report = convert_file(&converter, &args.input, &args.output, args.sql.as_deref())
        .with_context(|| format!("conversion of {} aborted", args.input.display()))?;

    info!(
        processed = report.processed,
        converted = report.succeeded,
        skipped = report.skipped,
        failed = report.failed,
        "conversion finished"
    );
    println!("{}", report);

    Ok(())
}
