//! Bid/ask-to-mid OHLC synthesis.
//!
//! Collapses each quote row's bid and ask sides into a single mid-price
//! OHLC observation. Daily source candles are stamped at their session
//! open hour (21:00 or 22:00 depending on DST); shifting each label
//! forward by `24 - hour` hours moves it to the following midnight so the
//! bar lands on the day the session closes. Minute data is not shifted.

use chrono::Duration;
use fxbundle_core::{hour_of, Frequency, PricePoint, QuoteRow};

/// Merge bid/ask rows into mid-price OHLC points.
pub fn synthesize(rows: &[QuoteRow], freq: Frequency) -> Vec<PricePoint> {
    rows.iter()
        .map(|row| {
            let ts = match freq {
                Frequency::Daily => {
                    row.ts + Duration::hours(24 - i64::from(hour_of(row.ts)))
                }
                Frequency::Minute => row.ts,
            };
            PricePoint {
                ts,
                open: row.mid_open(),
                high: row.mid_high(),
                low: row.mid_low(),
                close: row.mid_close(),
            }
        })
        .collect()
}
