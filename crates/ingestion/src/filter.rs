//! Trading-calendar session filtering.
//!
//! Drops resampled bars that fall outside valid sessions. Daily bars are
//! kept when their date is a session day; minute bars must additionally
//! sit inside the session's intraday open/close window.

use fxbundle_calendar::TradingCalendar;
use fxbundle_core::{Bar, Frequency};

/// Retain only bars inside valid trading sessions.
pub fn filter_sessions(
    bars: Vec<Bar>,
    calendar: &dyn TradingCalendar,
    freq: Frequency,
) -> Vec<Bar> {
    bars.into_iter()
        .filter(|bar| match freq {
            Frequency::Daily => calendar.is_session_day(bar.ts.date_naive()),
            Frequency::Minute => calendar.is_session_minute(bar.ts),
        })
        .collect()
}
