//! Kathmandu-zone clock and timestamp formatting.
//!
//! Every schedule decision and record stamp in the collector uses Nepal
//! Time (UTC+5:45, no daylight saving). This module is the single place
//! that names the zone and the three timestamp renderings used across the
//! system: RFC 3339 for machine fields, a plain display form for humans,
//! and a compact form for file names.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

/// The civil timezone all collection runs operate in.
pub const NEPAL_TZ: chrono_tz::Tz = chrono_tz::Asia::Kathmandu;

/// Current time in Nepal Time.
pub fn now_npt() -> DateTime<chrono_tz::Tz> {
    Utc::now().with_timezone(&NEPAL_TZ)
}

/// RFC 3339 rendering, e.g. `2025-08-17T11:30:00+05:45`.
pub fn iso_stamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.to_rfc3339()
}

/// Human-readable rendering, e.g. `2025-08-17 11:30:00`.
pub fn display_stamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// File-name rendering, e.g. `20250817_113000`.
pub fn file_stamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    ts.format("%Y%m%d_%H%M%S").to_string()
}
