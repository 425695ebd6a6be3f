//! Configuration for one ingestion run.
//!
//! All knobs live in an explicit immutable config object handed to the
//! orchestrator at call time; there is no module-level state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the built-in forex trading calendar.
pub const FOREX_CALENDAR: &str = "forex";

/// Data source identifier written into every metadata row.
pub const FXCM_EXCHANGE: &str = "FXCM";

/// Configuration for one bundle ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Root directory holding the `D1/` and `m1/` quote subdirectories.
    pub root: PathBuf,
    /// Trading calendar name resolved through the `CalendarProvider`.
    pub calendar: String,
    /// Inclusive lower bound of the ingestion window (no clipping if absent).
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound of the ingestion window (no clipping if absent).
    pub end: Option<NaiveDate>,
    /// Known data-quality cutoff; metadata start dates never precede it.
    pub earliest_date: NaiveDate,
    /// Exchange constant stamped on every metadata row.
    pub exchange: String,
    /// Worker threads for per-symbol pipelines (0 = use the rayon default).
    pub workers: usize,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            calendar: FOREX_CALENDAR.to_string(),
            start: None,
            end: None,
            earliest_date: default_earliest_date(),
            exchange: FXCM_EXCHANGE.to_string(),
            workers: 0,
        }
    }
}

impl BundleConfig {
    /// Config rooted at the given quote directory, everything else default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// The source data is inconsistent before this date.
fn default_earliest_date() -> NaiveDate {
    // 2001-09-17 is always a valid calendar date.
    NaiveDate::from_ymd_opt(2001, 9, 17).unwrap_or(NaiveDate::MIN)
}
