//! Typed error definitions for the NEPSE collector.
//!
//! Provides [`CollectorError`] for domain-specific errors that are more
//! informative than plain `anyhow::Error` strings. All variants implement
//! `std::error::Error` via `thiserror`, so they integrate seamlessly with
//! `anyhow::Result` at the driver and runner boundaries.

use thiserror::Error;

/// Domain-specific errors for the NEPSE collector.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Configuration parsing or validation error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP client construction or request error.
    #[error("http error: {0}")]
    Http(String),

    /// Dataset or summary file writing error.
    #[error("storage error: {0}")]
    Storage(String),
}
