//! CSV quote loading.
//!
//! Source files carry one row per candle with bid and ask OHLC columns:
//! `date,bidopen,bidhigh,bidlow,bidclose,askopen,askhigh,asklow,askclose`.
//! Files are not guaranteed sorted; the loader sorts ascending by timestamp.
//! Duplicate timestamps pass through untouched, the resampler averages them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use fxbundle_core::{Error, QuoteRow, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// One CSV record as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawQuote {
    date: String,
    bidopen: f64,
    bidhigh: f64,
    bidlow: f64,
    bidclose: f64,
    askopen: f64,
    askhigh: f64,
    asklow: f64,
    askclose: f64,
}

/// Load a per-symbol quote file into time-ordered rows.
///
/// Fails with `Error::Io` when the file cannot be opened and `Error::Parse`
/// when the timestamp or any price column is missing or non-numeric.
pub fn load_quotes(path: &Path) -> Result<Vec<QuoteRow>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<RawQuote>().enumerate() {
        // header occupies line 1
        let line = idx + 2;
        let raw = record.map_err(|e| Error::parse(path, line, e.to_string()))?;
        let ts = parse_timestamp(&raw.date).ok_or_else(|| {
            Error::parse(path, line, format!("unrecognized timestamp '{}'", raw.date))
        })?;
        rows.push(QuoteRow {
            ts,
            bid_open: raw.bidopen,
            bid_high: raw.bidhigh,
            bid_low: raw.bidlow,
            bid_close: raw.bidclose,
            ask_open: raw.askopen,
            ask_high: raw.askhigh,
            ask_low: raw.asklow,
            ask_close: raw.askclose,
        });
    }
    rows.sort_by_key(|r| r.ts);
    debug!(path = %path.display(), rows = rows.len(), "loaded quotes");
    Ok(rows)
}

/// Parse a source timestamp; daily files may carry a bare date.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}
