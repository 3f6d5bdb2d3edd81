//! Dataset sink: one CSV table plus a companion JSON summary per run.
//!
//! The sink receives the run's concatenated records and derives everything
//! else itself: the column union, the per-source counts, and the two file
//! names stamped with the run timestamp. Records are insertion-ordered
//! maps, so the CSV columns come out metadata-first in the order the
//! normalizer built them.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::{Map, Value};

use nepse_core::error::CollectorError;
use nepse_core::normalize::{COLLECTION_METHOD, Record};
use nepse_core::time_util;

use crate::endpoint::Endpoint;

/// Run-level columns appended after the record columns on every CSV row.
const RUN_COLUMNS: [&str; 3] =
    ["total_endpoints_collected", "endpoints_collected", "collection_run_id"];

/// Paths of the two files one run produces.
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub dataset: PathBuf,
    pub summary: PathBuf,
}

/// JSON descriptor written next to each dataset file.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub collection_time: String,
    pub total_records: usize,
    pub successful_endpoints: Vec<String>,
    pub records_by_source: Map<String, Value>,
    pub filename: String,
    pub market_open: bool,
    pub collection_method: String,
    pub run_id: String,
}

/// Sink collaborator bound to one output directory.
pub struct DatasetSink {
    data_dir: PathBuf,
}

impl DatasetSink {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Persist one run's records as `nepse_cloud_{stamp}.csv` plus
    /// `cloud_summary_{stamp}.json`.
    ///
    /// The output directory is created on demand. Any filesystem or CSV
    /// fault maps to [`CollectorError::Storage`]; partial files may remain
    /// behind in that case, the next run simply writes fresh names.
    pub fn write<Tz>(
        &self,
        records: &[Record],
        successful: &[Endpoint],
        run_id: &str,
        collected_at: &DateTime<Tz>,
        market_open: bool,
    ) -> Result<WrittenFiles, CollectorError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            CollectorError::Storage(format!(
                "cannot create {}: {e}",
                self.data_dir.display()
            ))
        })?;

        let stamp = time_util::file_stamp(collected_at);
        let csv_name = format!("nepse_cloud_{stamp}.csv");
        let dataset = self.data_dir.join(&csv_name);
        let summary_path = self.data_dir.join(format!("cloud_summary_{stamp}.json"));

        write_csv(&dataset, records, successful, run_id)?;

        let summary = RunSummary {
            collection_time: time_util::iso_stamp(collected_at),
            total_records: records.len(),
            successful_endpoints: successful.iter().map(|e| e.name().to_string()).collect(),
            records_by_source: counts_by_source(records),
            filename: csv_name,
            market_open,
            collection_method: COLLECTION_METHOD.to_string(),
            run_id: run_id.to_string(),
        };
        let body = serde_json::to_string_pretty(&summary)
            .map_err(|e| CollectorError::Storage(format!("cannot serialize summary: {e}")))?;
        fs::write(&summary_path, body).map_err(|e| {
            CollectorError::Storage(format!("cannot write {}: {e}", summary_path.display()))
        })?;

        Ok(WrittenFiles { dataset, summary: summary_path })
    }
}

fn write_csv(
    path: &Path,
    records: &[Record],
    successful: &[Endpoint],
    run_id: &str,
) -> Result<(), CollectorError> {
    let storage_err =
        |e: csv::Error| CollectorError::Storage(format!("cannot write {}: {e}", path.display()));

    let columns = column_union(records);
    let endpoints_joined =
        successful.iter().copied().map(Endpoint::name).collect::<Vec<_>>().join(", ");
    let total_endpoints = successful.len().to_string();

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CollectorError::Storage(format!("cannot create {}: {e}", path.display())))?;

    writer
        .write_record(columns.iter().map(String::as_str).chain(RUN_COLUMNS))
        .map_err(storage_err)?;

    for record in records {
        let cells = columns
            .iter()
            .map(|col| render_cell(record.get(col)))
            .chain([total_endpoints.clone(), endpoints_joined.clone(), run_id.to_string()]);
        writer.write_record(cells).map_err(storage_err)?;
    }

    writer
        .flush()
        .map_err(|e| CollectorError::Storage(format!("cannot flush {}: {e}", path.display())))
}

/// Union of record keys, ordered by first appearance across the run.
fn column_union(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

/// One CSV cell. Strings go out verbatim, scalars via `to_string`, null
/// and missing keys as empty cells, nested values as compact JSON.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested) => nested.to_string(),
    }
}

/// Per-source record counts keyed by the `data_source` field, in
/// first-appearance order.
fn counts_by_source(records: &[Record]) -> Map<String, Value> {
    let mut counts: Map<String, Value> = Map::new();
    for record in records {
        let source = record
            .get("data_source")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let next = counts.get(&source).and_then(Value::as_u64).unwrap_or(0) + 1;
        counts.insert(source, Value::from(next));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    fn fixed_ts() -> DateTime<FixedOffset> {
        let npt = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();
        npt.with_ymd_and_hms(2024, 1, 15, 11, 30, 0).unwrap()
    }

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn csv_columns_union_in_first_appearance_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DatasetSink::new(dir.path().join("data"));

        let records = vec![
            record(json!({"data_source": "live_market", "symbol": "NABIL", "ltp": 510})),
            record(json!({"data_source": "summary", "turnover": 5000})),
        ];
        let files = sink
            .write(&records, &[Endpoint::LiveMarket, Endpoint::Summary], "42", &fixed_ts(), true)
            .unwrap();

        let (headers, rows) = read_csv(&files.dataset);
        assert_eq!(
            headers,
            [
                "data_source",
                "symbol",
                "ltp",
                "turnover",
                "total_endpoints_collected",
                "endpoints_collected",
                "collection_run_id",
            ]
        );
        assert_eq!(rows.len(), 2);
        // A key missing from a record renders as an empty cell.
        assert_eq!(rows[0], ["live_market", "NABIL", "510", "", "2", "live_market, summary", "42"]);
        assert_eq!(rows[1], ["summary", "", "", "5000", "2", "live_market, summary", "42"]);
    }

    #[test]
    fn cell_rendering_rules() {
        assert_eq!(render_cell(None), "");
        assert_eq!(render_cell(Some(&Value::Null)), "");
        assert_eq!(render_cell(Some(&json!("plain"))), "plain");
        assert_eq!(render_cell(Some(&json!(true))), "true");
        assert_eq!(render_cell(Some(&json!(12.5))), "12.5");
        // Nested values fall back to compact JSON.
        assert_eq!(render_cell(Some(&json!({"a": 1}))), r#"{"a":1}"#);
        assert_eq!(render_cell(Some(&json!([1, 2]))), "[1,2]");
    }

    #[test]
    fn summary_descriptor_fields() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DatasetSink::new(dir.path());

        let records = vec![
            record(json!({"data_source": "floorsheet", "contract": 1})),
            record(json!({"data_source": "floorsheet", "contract": 2})),
            record(json!({"data_source": "summary", "turnover": 9})),
        ];
        let files = sink
            .write(&records, &[Endpoint::Floorsheet, Endpoint::Summary], "local", &fixed_ts(), true)
            .unwrap();

        let summary: Value =
            serde_json::from_str(&fs::read_to_string(&files.summary).unwrap()).unwrap();
        assert_eq!(summary["collection_time"], "2024-01-15T11:30:00+05:45");
        assert_eq!(summary["total_records"], 3);
        assert_eq!(summary["successful_endpoints"], json!(["floorsheet", "summary"]));
        assert_eq!(summary["records_by_source"], json!({"floorsheet": 2, "summary": 1}));
        assert_eq!(summary["filename"], "nepse_cloud_20240115_113000.csv");
        assert_eq!(summary["market_open"], true);
        assert_eq!(summary["collection_method"], COLLECTION_METHOD);
        assert_eq!(summary["run_id"], "local");
    }

    #[test]
    fn files_are_stamped_with_the_run_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DatasetSink::new(dir.path());

        let records = vec![record(json!({"data_source": "nepse_index", "index": 2100.5}))];
        let files =
            sink.write(&records, &[Endpoint::NepseIndex], "7", &fixed_ts(), true).unwrap();

        assert!(files.dataset.ends_with("nepse_cloud_20240115_113000.csv"));
        assert!(files.summary.ends_with("cloud_summary_20240115_113000.json"));
        assert!(files.dataset.exists());
        assert!(files.summary.exists());
    }

    #[test]
    fn output_directory_is_created_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = DatasetSink::new(&nested);

        let records = vec![record(json!({"data_source": "summary", "x": 1}))];
        sink.write(&records, &[Endpoint::Summary], "local", &fixed_ts(), true).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn per_source_counts_keep_first_appearance_order() {
        let records = vec![
            record(json!({"data_source": "top_gainers"})),
            record(json!({"data_source": "floorsheet"})),
            record(json!({"data_source": "top_gainers"})),
            record(json!({"no_source_field": true})),
        ];
        let counts = counts_by_source(&records);
        let keys: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["top_gainers", "floorsheet", "unknown"]);
        assert_eq!(counts["top_gainers"], 2);
        assert_eq!(counts["floorsheet"], 1);
    }
}
