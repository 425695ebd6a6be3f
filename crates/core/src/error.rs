//! Error types for the fxbundle ingestion pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ingestion pipeline.
///
/// Every variant is fatal for the whole run: the orchestrator performs no
/// partial commits and surfaces the first error to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// File missing or unreadable.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed timestamp or price field in a source file.
    #[error("parse error in {}, line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A symbol's series has no usable periods.
    #[error("empty series for {symbol}: {detail}")]
    EmptySeries { symbol: String, detail: String },

    /// A collaborator write failed.
    #[error("writer error: {0}")]
    Writer(String),

    /// Configuration error (unknown calendar, bad root, bad window).
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an I/O error tagged with the offending path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error tagged with path and line.
    pub fn parse(path: impl AsRef<Path>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create an empty-series error for a symbol.
    pub fn empty_series(symbol: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::EmptySeries {
            symbol: symbol.into(),
            detail: detail.into(),
        }
    }

    /// Create a writer error.
    pub fn writer(msg: impl Into<String>) -> Self {
        Error::Writer(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
