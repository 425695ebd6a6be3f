//! Bundle orchestration for the fxbundle pipeline.
//!
//! This crate handles:
//! - Symbol discovery and deterministic sid assignment
//! - Driving the per-symbol ingestion chain (in parallel)
//! - Per-symbol lifecycle metadata
//! - Handing results to the writer collaborators

pub mod ingest;
pub mod metadata;
pub mod writers;

pub use ingest::{discover_symbols, ingest};
pub use metadata::MetadataBuilder;
pub use writers::{
    AdjustmentWriter, AssetDbWriter, CsvBarStore, DailyBarWriter, JsonAssetDb, MinuteBarWriter,
    NoAdjustments,
};
