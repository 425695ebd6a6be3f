//! Bundle orchestration.
//!
//! Discovers symbols under the quote root, assigns sids in lexicographic
//! discovery order before any parallel work, runs the per-symbol chain
//! (load -> synthesize -> resample -> filter -> clip) for the daily and
//! minute files on a bounded rayon pool, then hands the buffered results
//! to the writer collaborators sequentially. The first error from any
//! worker aborts the run; nothing is written on failure.

use chrono::NaiveDate;
use fxbundle_calendar::{CalendarProvider, TradingCalendar};
use fxbundle_core::{Bar, BundleConfig, BundleOutput, Error, Frequency, Result, Sid};
use fxbundle_ingestion::{filter_sessions, load_quotes, resample, synthesize};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fully processed bars for one symbol.
struct SymbolSeries {
    sid: Sid,
    symbol: String,
    daily: Vec<Bar>,
    minute: Vec<Bar>,
}

/// Discover symbols by scanning `root/D1` for `<SYMBOL>_D1.csv` files.
///
/// The returned order is lexicographic; it determines sid assignment and
/// must stay deterministic across runs.
pub fn discover_symbols(root: &Path) -> Result<Vec<String>> {
    let daily_dir = root.join(Frequency::Daily.file_tag());
    let entries = std::fs::read_dir(&daily_dir).map_err(|e| Error::io(&daily_dir, e))?;

    let mut symbols = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(&daily_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(symbol) = name.strip_suffix("_D1.csv") {
            if !symbol.is_empty() {
                symbols.push(symbol.to_string());
            }
        }
    }
    symbols.sort();
    Ok(symbols)
}

/// Run one full bundle ingestion.
///
/// Results are buffered per symbol and submitted to the writers once,
/// after every symbol completes, preserving the sid-to-data mapping
/// regardless of worker scheduling. Returns what was written.
pub fn ingest(
    config: &BundleConfig,
    provider: &dyn CalendarProvider,
    daily_writer: &mut dyn crate::writers::DailyBarWriter,
    minute_writer: &mut dyn crate::writers::MinuteBarWriter,
    asset_db_writer: &mut dyn crate::writers::AssetDbWriter,
    adjustment_writer: &mut dyn crate::writers::AdjustmentWriter,
) -> Result<BundleOutput> {
    let calendar = provider.get_calendar(&config.calendar)?;
    let symbols = discover_symbols(&config.root)?;
    if symbols.is_empty() {
        return Err(Error::config(format!(
            "no {}/<SYMBOL>_D1.csv files under {}",
            Frequency::Daily.file_tag(),
            config.root.display()
        )));
    }
    info!(count = symbols.len(), symbols = ?symbols, "making bundle");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .build()
        .map_err(|e| Error::config(format!("building worker pool: {e}")))?;

    // Sids are fixed by the sorted enumeration above; the indexed parallel
    // collect keeps results in that order no matter which worker finishes
    // first.
    let series: Vec<SymbolSeries> = pool.install(|| {
        symbols
            .par_iter()
            .enumerate()
            .map(|(sid, symbol)| process_symbol(config, calendar.as_ref(), sid as Sid, symbol))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut output = BundleOutput::default();
    let mut metadata = crate::metadata::MetadataBuilder::new(
        config.earliest_date,
        config.exchange.clone(),
    );
    for s in series {
        // daily range drives the lifecycle dates; run_chain already
        // rejected empty series, so every sid gets a metadata row
        let (first_ts, last_ts) = match (s.daily.first(), s.daily.last()) {
            (Some(first), Some(last)) => (first.ts, last.ts),
            _ => return Err(Error::empty_series(&s.symbol, "daily series has no bars")),
        };
        metadata.push(s.sid, s.symbol.clone(), first_ts, last_ts);
        output.daily.push((s.sid, s.daily));
        output.minute.push((s.sid, s.minute));
    }
    output.metadata = metadata.build();

    daily_writer.write(&output.daily)?;
    info!("daily bars written");
    minute_writer.write(&output.minute)?;
    info!("minute bars written");
    asset_db_writer.write(&output.metadata)?;
    adjustment_writer.write()?;
    info!("metadata written");

    Ok(output)
}

/// Run the ingestion chain for one symbol's daily and minute files.
fn process_symbol(
    config: &BundleConfig,
    calendar: &dyn TradingCalendar,
    sid: Sid,
    symbol: &str,
) -> Result<SymbolSeries> {
    let daily = run_chain(config, calendar, symbol, Frequency::Daily)?;
    let minute = run_chain(config, calendar, symbol, Frequency::Minute)?;
    Ok(SymbolSeries {
        sid,
        symbol: symbol.to_string(),
        daily,
        minute,
    })
}

fn run_chain(
    config: &BundleConfig,
    calendar: &dyn TradingCalendar,
    symbol: &str,
    freq: Frequency,
) -> Result<Vec<Bar>> {
    let path = quote_path(&config.root, symbol, freq);
    let rows = load_quotes(&path)?;
    let points = synthesize(&rows, freq);
    let bars = resample(symbol, &points, freq)?;
    let candles_before = bars.len();

    let bars = filter_sessions(bars, calendar, freq);
    let bars = clip(bars, config.start, config.end);
    if bars.is_empty() {
        return Err(Error::empty_series(
            symbol,
            format!("no {} bars inside sessions and window", freq.file_tag()),
        ));
    }
    info!(
        symbol,
        freq = freq.file_tag(),
        candles_before,
        candles_after = bars.len(),
        "preprocessed"
    );
    Ok(bars)
}

/// `root/D1/<SYMBOL>_D1.csv` or `root/m1/<SYMBOL>_m1.csv`.
fn quote_path(root: &Path, symbol: &str, freq: Frequency) -> PathBuf {
    let tag = freq.file_tag();
    root.join(tag).join(format!("{symbol}_{tag}.csv"))
}

/// Keep bars whose date falls inside the inclusive `[start, end]` window.
fn clip(bars: Vec<Bar>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<Bar> {
    if start.is_none() && end.is_none() {
        return bars;
    }
    bars.into_iter()
        .filter(|bar| {
            let date = bar.ts.date_naive();
            start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
        })
        .collect()
}
