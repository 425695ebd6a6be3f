//! Core types and configuration for the fxbundle ingestion pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (quote rows, price points, bars)
//! - Per-symbol lifecycle metadata
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::BundleConfig;
pub use error::{Error, Result};
pub use types::*;
