//! newsprint-sql: Render converted news records as an SQL insert script
//!
//! Reads the output of `newsprint-convert` (array or envelope layout).
//!
//! Usage:
//!   newsprint-sql converted_news_data.json -o insert_news_data.sql

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use newsprint::writer::write_atomically;
use newsprint::{read_converted, write_sql, CONVERSION_TIME_FORMAT};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "newsprint-sql")]
#[command(about = "Render converted news records as INSERT statements", long_about = None)]
struct Args {
    /// Converted JSON document
    #[arg(value_name = "FILE", default_value = "converted_news_data.json")]
    input: PathBuf,

    /// Output SQL script
    #[arg(long, short = 'o', default_value = "insert_news_data.sql")]
    output: PathBuf,
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

    let records = read_converted(&args.input)
        .with_context(|| format!("failed to read converted records from {}", args.input.display()))?;

    let generated_at = Local::now().naive_local().format(CONVERSION_TIME_FORMAT).to_string();
    let mut statements = 0;
    write_atomically(&args.output, |w| {
        statements = write_sql(w, &records, &generated_at)?;
        Ok(())
    })
    .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(path = %args.output.display(), statements, "wrote SQL script");
    println!("wrote {} insert statements to {}", statements, args.output.display());

    Ok(())
}
