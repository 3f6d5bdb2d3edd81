//! Flattens heterogeneous JSON payloads into uniform tabular records.
//!
//! Endpoints answer with either a list of objects (table endpoints) or a
//! bare object (the summary endpoint). [`normalize`] turns either shape
//! into zero or more flat [`Record`]s: a fixed metadata prefix followed by
//! the payload's own fields with cleaned keys. Whatever the input shape,
//! the function returns records, never an error; an unusable payload is
//! an empty vector.

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde_json::{Map, Value};

use crate::schedule::MarketStatus;
use crate::time_util;

/// Tag stamped into every record's `collection_method` field.
pub const COLLECTION_METHOD: &str = "cloud_automated";

/// One flattened record. Backed by an insertion-ordered map, so the
/// metadata keys stay in front of the payload keys they were inserted
/// before.
pub type Record = Map<String, Value>;

// ---------------------------------------------------------------------------
// Payload classification
// ---------------------------------------------------------------------------

/// Shape of a raw payload, decided once at the normalizer's entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// Non-empty JSON array: one record per object element.
    Table(&'a [Value]),
    /// Non-empty JSON object: exactly one record.
    Summary(&'a Map<String, Value>),
    /// Null, empty array, or empty object: nothing to report.
    Empty,
    /// Any other JSON shape (string, number, bool): nothing to report.
    Unsupported,
}

impl<'a> Payload<'a> {
    /// Classify a raw payload value.
    ///
    /// `Empty` and `Unsupported` both normalize to zero records; callers
    /// may tell them apart for log lines, nothing else.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Null => Payload::Empty,
            Value::Array(rows) if rows.is_empty() => Payload::Empty,
            Value::Array(rows) => Payload::Table(rows),
            Value::Object(fields) if fields.is_empty() => Payload::Empty,
            Value::Object(fields) => Payload::Summary(fields),
            _ => Payload::Unsupported,
        }
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Flatten one endpoint's payload into uniform records.
///
/// `collected_at` and `status` are the run's single clock reading and
/// oracle decision; every record of the run carries identical values for
/// the timestamp, openness, and schedule fields.
///
/// List payloads yield one record per object element with 1-based ids
/// (`"{source}_{i}"`); non-object elements are skipped but still advance
/// the position. A bare object yields one `"{source}_summary"` record.
/// Anything else yields no records.
pub fn normalize<Tz>(
    payload: &Value,
    source: &str,
    collected_at: &DateTime<Tz>,
    status: &MarketStatus,
) -> Vec<Record>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match Payload::classify(payload) {
        Payload::Empty | Payload::Unsupported => Vec::new(),
        Payload::Table(rows) => rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let fields = row.as_object()?;
                let record_id = format!("{source}_{}", i + 1);
                let mut record = base_record(source, &record_id, collected_at, status);
                merge_payload_fields(&mut record, fields);
                Some(record)
            })
            .collect(),
        Payload::Summary(fields) => {
            let record_id = format!("{source}_summary");
            let mut record = base_record(source, &record_id, collected_at, status);
            merge_payload_fields(&mut record, fields);
            vec![record]
        }
    }
}

/// Clean a payload key: lowercase and replace literal spaces with
/// underscores. No other rewriting: camelCase keys stay fused
/// (`"TotalTurnover"` → `"totalturnover"`).
pub fn clean_key(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "_")
}

/// The fixed metadata prefix shared by every record of a run.
fn base_record<Tz>(
    source: &str,
    record_id: &str,
    collected_at: &DateTime<Tz>,
    status: &MarketStatus,
) -> Record
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut record = Record::new();
    record.insert(
        "collection_timestamp".to_string(),
        Value::String(time_util::iso_stamp(collected_at)),
    );
    record.insert(
        "collection_time_npt".to_string(),
        Value::String(time_util::display_stamp(collected_at)),
    );
    record.insert("data_source".to_string(), Value::String(source.to_string()));
    record.insert("record_id".to_string(), Value::String(record_id.to_string()));
    record.insert("market_open".to_string(), Value::Bool(status.is_open));
    record.insert(
        "collection_method".to_string(),
        Value::String(COLLECTION_METHOD.to_string()),
    );
    record.insert(
        "market_schedule".to_string(),
        Value::String(status.description.clone()),
    );
    record
}

/// Insert payload fields after the metadata prefix.
///
/// `Map::insert` overwrites on collision, so a payload key that cleans to
/// a metadata name replaces the metadata value. That merge order is
/// long-standing output behavior and is kept as-is.
fn merge_payload_fields(record: &mut Record, fields: &Map<String, Value>) {
    for (key, value) in fields {
        record.insert(clean_key(key), value.clone());
    }
}
