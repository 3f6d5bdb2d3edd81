//! # nepse-collect
//!
//! I/O collaborators and the run driver for the NEPSE cloud collector.
//!
//! The pure decision logic lives in `nepse-core`; this crate supplies the
//! pieces that touch the outside world:
//!
//! - [`endpoint`] — the fixed set of upstream API endpoints
//! - [`client`] — reqwest-based fetch collaborator (probe + per-endpoint GET)
//! - [`sink`] — dataset sink writing the CSV table and JSON summary
//! - [`collector`] — `collect_single_run`, the linear driver tying it together

pub mod client;
pub mod collector;
pub mod endpoint;
pub mod sink;

pub use client::ApiClient;
pub use collector::{RunOutcome, collect_single_run};
pub use endpoint::Endpoint;
pub use sink::DatasetSink;
