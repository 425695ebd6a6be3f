//! Fixed-frequency resampling with forward gap-filling.
//!
//! Aggregates synthesized points onto a 1-day or 1-minute grid spanning
//! `[floor(min ts), floor(max ts)]`. Points sharing a period are combined
//! by arithmetic mean per OHLC field; empty periods repeat the preceding
//! period's OHLC with volume 0. There is no backward fill: a span whose
//! first period holds no data is an error.

use chrono::{DateTime, Utc};
use fxbundle_core::{Bar, Error, Frequency, PricePoint, Result};
use std::collections::BTreeMap;

/// Accumulates the points that fall into one grid period.
#[derive(Debug, Clone, Copy, Default)]
struct PeriodAccum {
    open_sum: f64,
    high_sum: f64,
    low_sum: f64,
    close_sum: f64,
    count: u32,
}

impl PeriodAccum {
    fn add(&mut self, point: &PricePoint) {
        self.open_sum += point.open;
        self.high_sum += point.high;
        self.low_sum += point.low;
        self.close_sum += point.close;
        self.count += 1;
    }

    fn mean_bar(&self, ts: DateTime<Utc>) -> Bar {
        let n = f64::from(self.count);
        Bar {
            ts,
            open: self.open_sum / n,
            high: self.high_sum / n,
            low: self.low_sum / n,
            close: self.close_sum / n,
            volume: 0,
        }
    }
}

/// Resample points onto the fixed grid for `freq`, forward-filling gaps.
///
/// `symbol` only tags errors.
pub fn resample(symbol: &str, points: &[PricePoint], freq: Frequency) -> Result<Vec<Bar>> {
    let mut periods: BTreeMap<DateTime<Utc>, PeriodAccum> = BTreeMap::new();
    for point in points {
        periods.entry(freq.floor(point.ts)).or_default().add(point);
    }

    let (first, last) = match (periods.keys().next(), periods.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Err(Error::empty_series(symbol, "no synthesized rows to resample")),
    };

    let period = freq.period();
    let mut bars = Vec::new();
    let mut prev: Option<Bar> = None;
    let mut ts = first;
    while ts <= last {
        let bar = match (periods.get(&ts), &prev) {
            (Some(accum), _) => accum.mean_bar(ts),
            (None, Some(filled)) => Bar { ts, volume: 0, ..filled.clone() },
            (None, None) => {
                return Err(Error::empty_series(
                    symbol,
                    "first period of the resampling span has no data",
                ))
            }
        };
        prev = Some(bar.clone());
        bars.push(bar);
        ts += period;
    }
    Ok(bars)
}
