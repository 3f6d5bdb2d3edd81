//! The linear run driver: one invocation, one collection attempt.
//!
//! [`collect_single_run`] reads the Kathmandu clock once, asks the schedule
//! oracle once, and shares that single answer with every record of the run.
//! Endpoints are fetched strictly sequentially; a failing endpoint is
//! logged and skipped, never fatal. Every no-data condition comes back as
//! `Ok(None)` so the caller can keep a clean exit; `Err` is reserved for
//! storage faults.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use nepse_core::normalize::{Payload, Record, normalize};
use nepse_core::schedule::classify;
use nepse_core::time_util;

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::sink::DatasetSink;

/// Log lines keep failure reasons short, matching the collector's
/// historical log format.
const REASON_LIMIT: usize = 80;

/// What one successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub dataset_path: PathBuf,
    pub summary_path: PathBuf,
    pub total_records: usize,
    pub successful_endpoints: Vec<Endpoint>,
}

/// Run one collection attempt end to end.
///
/// Returns `Ok(None)` when there is nothing to persist: market closed,
/// API unreachable, or every endpoint empty. Only sink failures are `Err`.
pub async fn collect_single_run(
    client: &ApiClient,
    sink: &DatasetSink,
    run_id: &str,
) -> Result<Option<RunOutcome>> {
    let collected_at = time_util::now_npt();
    info!("starting cloud data collection at {}", time_util::display_stamp(&collected_at));

    let status = classify(&collected_at);
    if !status.is_open {
        info!("market is closed - no collection needed ({})", status.description);
        return Ok(None);
    }

    if !client.ping().await {
        warn!("API connection failed - cannot collect data");
        return Ok(None);
    }
    info!("API server is accessible at {}", client.base_url());

    let mut all_records: Vec<Record> = Vec::new();
    let mut successful: Vec<Endpoint> = Vec::new();

    for endpoint in Endpoint::ALL {
        info!("collecting from {endpoint}...");
        let raw = match client.fetch(endpoint).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{endpoint}: {}", truncate_reason(&e.to_string()));
                continue;
            }
        };

        // Empty and unsupported payloads differ in log lines only; both
        // normalize to zero records.
        match Payload::classify(&raw) {
            Payload::Empty => debug!("{endpoint}: empty payload"),
            Payload::Unsupported => warn!("{endpoint}: unsupported payload shape, skipping"),
            _ => {}
        }

        let records = normalize(&raw, endpoint.name(), &collected_at, &status);
        info!("{endpoint}: {} records", records.len());
        if !records.is_empty() {
            successful.push(endpoint);
            all_records.extend(records);
        }
    }

    if all_records.is_empty() {
        info!("no data collected from any endpoint");
        return Ok(None);
    }

    let files = sink.write(&all_records, &successful, run_id, &collected_at, status.is_open)?;

    info!("cloud collection successful: {}", files.dataset.display());
    info!("total records: {} from {} endpoints", all_records.len(), successful.len());
    for endpoint in &successful {
        let count = all_records
            .iter()
            .filter(|r| r.get("data_source").and_then(|v| v.as_str()) == Some(endpoint.name()))
            .count();
        info!("  {endpoint}: {count} records");
    }

    Ok(Some(RunOutcome {
        dataset_path: files.dataset,
        summary_path: files.summary,
        total_records: all_records.len(),
        successful_endpoints: successful,
    }))
}

fn truncate_reason(reason: &str) -> String {
    if reason.chars().count() <= REASON_LIMIT {
        return reason.to_string();
    }
    let truncated: String = reason.chars().take(REASON_LIMIT).collect();
    format!("{truncated}...")
}
