//! Writer collaborator contracts.
//!
//! The persisted bar-store and asset-database formats live outside this
//! pipeline; the orchestrator only talks to these traits. The filesystem
//! implementations below are reference writers so the CLI produces
//! inspectable output: one CSV file per sid and a JSON metadata table.

use fxbundle_core::{Bar, Error, Result, Sid, SymbolMetadata};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Sink for the daily bar series of every sid.
pub trait DailyBarWriter {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()>;
}

/// Sink for the minute bar series of every sid.
pub trait MinuteBarWriter {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()>;
}

/// Sink for the asset metadata table.
pub trait AssetDbWriter {
    fn write(&mut self, equities: &[SymbolMetadata]) -> Result<()>;
}

/// Sink for corporate-action adjustments. This pipeline models none, so
/// the writer is always invoked with an empty set.
pub trait AdjustmentWriter {
    fn write(&mut self) -> Result<()>;
}

/// Reference bar writer: one `<sid>_<tag>.csv` file per series.
pub struct CsvBarStore {
    dir: PathBuf,
    tag: &'static str,
}

impl CsvBarStore {
    /// Store for daily series under `dir`.
    pub fn daily(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), tag: "D1" }
    }

    /// Store for minute series under `dir`.
    pub fn minute(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), tag: "m1" }
    }

    fn write_all(&self, data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::writer(format!("creating {}: {e}", self.dir.display())))?;
        for (sid, bars) in data {
            let path = self.dir.join(format!("{sid}_{}.csv", self.tag));
            let mut writer = csv::Writer::from_path(&path)
                .map_err(|e| Error::writer(format!("opening {}: {e}", path.display())))?;
            for bar in bars {
                writer
                    .serialize(bar)
                    .map_err(|e| Error::writer(format!("writing {}: {e}", path.display())))?;
            }
            writer
                .flush()
                .map_err(|e| Error::writer(format!("flushing {}: {e}", path.display())))?;
        }
        Ok(())
    }
}

impl DailyBarWriter for CsvBarStore {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        self.write_all(data)
    }
}

impl MinuteBarWriter for CsvBarStore {
    fn write(&mut self, data: &[(Sid, Vec<Bar>)]) -> Result<()> {
        self.write_all(data)
    }
}

/// Reference asset-db writer: pretty-printed JSON table.
pub struct JsonAssetDb {
    path: PathBuf,
}

impl JsonAssetDb {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AssetDbWriter for JsonAssetDb {
    fn write(&mut self, equities: &[SymbolMetadata]) -> Result<()> {
        let json = serde_json::to_string_pretty(equities)
            .map_err(|e| Error::writer(format!("serializing metadata: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| Error::writer(format!("writing {}: {e}", self.path.display())))
    }
}

/// Adjustment writer that records the (empty) write and does nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAdjustments;

impl AdjustmentWriter for NoAdjustments {
    fn write(&mut self) -> Result<()> {
        info!("no adjustments to write");
        Ok(())
    }
}
