//! # nepse-core
//!
//! Core crate for the NEPSE cloud collector, providing:
//!
//! - **Schedule** (`schedule`): market-hours oracle for the NEPSE trading week
//! - **Normalization** (`normalize`): flattens raw JSON payloads into uniform records
//! - **Configuration** (`config`): JSON config deserialization
//! - **Error types** (`error`): domain-specific `CollectorError` via thiserror
//! - **Time utilities** (`time_util`): Kathmandu-zone clock and stamp formatting
//! - **Logging** (`logging`): tracing-based console + rolling file output

pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod schedule;
pub mod time_util;

// Decision-logic entry points, re-exported at crate root.
pub use normalize::{Record, normalize};
pub use schedule::{MarketStatus, classify};
