//! fxbundle CLI: ingest FX quote files into a bar bundle.
//!
//! Reads `<root>/D1/<SYMBOL>_D1.csv` and `<root>/m1/<SYMBOL>_m1.csv`,
//! runs the full pipeline, and writes per-sid bar CSVs plus a JSON asset
//! table under the output directory.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fxbundle_bundle::{ingest, CsvBarStore, JsonAssetDb, NoAdjustments};
use fxbundle_calendar::BuiltinCalendars;
use fxbundle_core::BundleConfig;

#[derive(Parser)]
#[command(name = "fxbundle", about = "FX quote-to-bar bundle ingestion")]
struct Cli {
    /// Quote root directory containing D1/ and m1/ subdirectories.
    root: PathBuf,

    /// Trading calendar name.
    #[arg(long, default_value = "forex")]
    calendar: String,

    /// Inclusive start of the ingestion window (YYYY-MM-DD).
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Inclusive end of the ingestion window (YYYY-MM-DD).
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Output directory for bar CSVs and the asset table.
    #[arg(long, default_value = "bundle-out")]
    out: PathBuf,

    /// Worker threads for per-symbol pipelines (0 = auto).
    #[arg(long, default_value_t = 0)]
    workers: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = BundleConfig {
        root: cli.root,
        calendar: cli.calendar,
        start: cli.start,
        end: cli.end,
        workers: cli.workers,
        ..BundleConfig::default()
    };

    let provider = BuiltinCalendars::new();
    let mut daily_writer = CsvBarStore::daily(cli.out.join("daily"));
    let mut minute_writer = CsvBarStore::minute(cli.out.join("minute"));
    let mut asset_db_writer = JsonAssetDb::new(cli.out.join("assets.json"));
    let mut adjustment_writer = NoAdjustments;

    let output = ingest(
        &config,
        &provider,
        &mut daily_writer,
        &mut minute_writer,
        &mut asset_db_writer,
        &mut adjustment_writer,
    )?;

    info!(
        symbols = output.metadata.len(),
        out = %cli.out.display(),
        "bundle complete"
    );
    Ok(())
}
