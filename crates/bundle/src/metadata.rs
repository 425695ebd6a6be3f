//! Per-symbol lifecycle metadata.
//!
//! After filtering and clipping, each symbol contributes one row:
//! `start_date` is the first retained timestamp clamped to the
//! earliest-valid floor, `end_date` the last, `first_traded` equals
//! `start_date`, and `auto_close_date` is the day after `end_date`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use fxbundle_core::{Sid, SymbolMetadata};

/// Accumulates metadata rows ordered by sid.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    earliest_date: NaiveDate,
    exchange: String,
    rows: Vec<SymbolMetadata>,
}

impl MetadataBuilder {
    /// Builder with the given earliest-valid floor and exchange constant.
    pub fn new(earliest_date: NaiveDate, exchange: impl Into<String>) -> Self {
        Self {
            earliest_date,
            exchange: exchange.into(),
            rows: Vec::new(),
        }
    }

    /// Record one symbol's date range. Callers push in ascending sid order.
    pub fn push(
        &mut self,
        sid: Sid,
        symbol: impl Into<String>,
        first_ts: DateTime<Utc>,
        last_ts: DateTime<Utc>,
    ) {
        let start_date = first_ts.date_naive().max(self.earliest_date);
        let end_date = last_ts.date_naive();
        self.rows.push(SymbolMetadata {
            sid,
            symbol: symbol.into(),
            start_date,
            end_date,
            first_traded: start_date,
            auto_close_date: end_date + Duration::days(1),
            exchange: self.exchange.clone(),
        });
    }

    /// Finish and return the table, ordered by sid.
    pub fn build(self) -> Vec<SymbolMetadata> {
        self.rows
    }
}
