//! Quote ingestion and normalization for the fxbundle pipeline.
//!
//! This crate handles the per-symbol transformation chain:
//! - CSV quote loading (unsorted bid/ask rows -> ordered `QuoteRow`s)
//! - Bid/ask-to-mid OHLC synthesis
//! - Fixed-frequency resampling with forward gap-filling
//! - Trading-calendar session filtering

pub mod filter;
pub mod loader;
pub mod resample;
pub mod synth;

pub use filter::filter_sessions;
pub use loader::load_quotes;
pub use resample::resample;
pub use synth::synthesize;
