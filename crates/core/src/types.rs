//! Core data types for the fxbundle ingestion pipeline.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Sequential integer identifier assigned to a symbol for one ingestion run.
pub type Sid = u32;

/// Sampling frequency of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    /// One bar per calendar day.
    Daily,
    /// One bar per minute.
    Minute,
}

impl Frequency {
    /// Length of one period at this frequency.
    pub fn period(self) -> Duration {
        match self {
            Frequency::Daily => Duration::days(1),
            Frequency::Minute => Duration::minutes(1),
        }
    }

    /// Floor a timestamp to the start of its period.
    pub fn floor(self, ts: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Frequency::Daily => ts.date_naive().and_time(NaiveTime::MIN).and_utc(),
            Frequency::Minute => {
                let extra_secs = ts.timestamp().rem_euclid(60);
                ts - Duration::seconds(extra_secs)
                    - Duration::nanoseconds(i64::from(ts.timestamp_subsec_nanos()))
            }
        }
    }

    /// File-naming suffix for this frequency (`EURUSD_D1.csv`, `EURUSD_m1.csv`).
    pub fn file_tag(self) -> &'static str {
        match self {
            Frequency::Daily => "D1",
            Frequency::Minute => "m1",
        }
    }
}

/// One raw bid/ask quote record from a source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    /// Timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Bid open price.
    pub bid_open: f64,
    /// Bid high price.
    pub bid_high: f64,
    /// Bid low price.
    pub bid_low: f64,
    /// Bid close price.
    pub bid_close: f64,
    /// Ask open price.
    pub ask_open: f64,
    /// Ask high price.
    pub ask_high: f64,
    /// Ask low price.
    pub ask_low: f64,
    /// Ask close price.
    pub ask_close: f64,
}

impl QuoteRow {
    /// Mid price at open: (bid + ask) / 2.
    #[inline]
    pub fn mid_open(&self) -> f64 {
        (self.bid_open + self.ask_open) / 2.0
    }

    /// Mid price at high.
    #[inline]
    pub fn mid_high(&self) -> f64 {
        (self.bid_high + self.ask_high) / 2.0
    }

    /// Mid price at low.
    #[inline]
    pub fn mid_low(&self) -> f64 {
        (self.bid_low + self.ask_low) / 2.0
    }

    /// Mid price at close.
    #[inline]
    pub fn mid_close(&self) -> f64 {
        (self.bid_close + self.ask_close) / 2.0
    }
}

/// A synthesized mid-price OHLC observation, not yet on a fixed grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Timestamp (UTC), possibly label-shifted for daily data.
    pub ts: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One OHLCV bar on the fixed-frequency grid.
///
/// Volume is a placeholder: the FX quote sources carry no trade volume,
/// so every bar is written with volume 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Period start timestamp (UTC).
    pub ts: DateTime<Utc>,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume (always 0 for quote-derived bars).
    pub volume: u32,
}

/// Lifecycle metadata for one symbol, one row of the asset table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMetadata {
    /// Sequential id assigned by discovery order.
    pub sid: Sid,
    /// Ticker, e.g. `EURUSD`.
    pub symbol: String,
    /// First valid trading date, clamped to the earliest-valid floor.
    pub start_date: NaiveDate,
    /// Last trading date.
    pub end_date: NaiveDate,
    /// Equal to `start_date`.
    pub first_traded: NaiveDate,
    /// Day after `end_date`; the symbol is treated as delisted from here on.
    pub auto_close_date: NaiveDate,
    /// Data source identifier.
    pub exchange: String,
}

/// Everything one ingestion run produced, keyed by sid.
///
/// `daily`, `minute` and `metadata` are parallel: index `i` holds sid `i`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BundleOutput {
    /// Daily bar series per sid.
    pub daily: Vec<(Sid, Vec<Bar>)>,
    /// Minute bar series per sid.
    pub minute: Vec<(Sid, Vec<Bar>)>,
    /// Asset metadata table, ordered by sid.
    pub metadata: Vec<SymbolMetadata>,
}

/// Hour of a timestamp, 0-23.
#[inline]
pub fn hour_of(ts: DateTime<Utc>) -> u32 {
    ts.hour()
}
