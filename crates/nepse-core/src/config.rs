//! Configuration parsing for the collector.
//!
//! A single JSON file covers the whole process. Every field is optional;
//! `effective_*` accessors supply the defaults so callers never branch on
//! `Option` themselves.
//!
//! # Example config
//!
//! ```json
//! {
//!   "api_base_url": "http://localhost:8000",
//!   "data_dir": "data",
//!   "request_timeout_sec": 30,
//!   "ping_timeout_sec": 10,
//!   "user_agent": "NEPSE-Cloud-Collector/1.0"
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::CollectorError;

/// Default base address of the upstream API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default User-Agent announced on every request.
pub const DEFAULT_USER_AGENT: &str = "NEPSE-Cloud-Collector/1.0";

/// Top-level collector config, deserialized from a JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectorConfig {
    /// Base address of the upstream API (default: `http://localhost:8000`).
    pub api_base_url: Option<String>,

    /// Directory datasets are written to (default: `data`).
    pub data_dir: Option<String>,

    /// Per-endpoint request timeout in seconds (default: 30).
    pub request_timeout_sec: Option<u64>,

    /// Connectivity-probe timeout in seconds (default: 10).
    pub ping_timeout_sec: Option<u64>,

    /// User-Agent header value (default: `NEPSE-Cloud-Collector/1.0`).
    pub user_agent: Option<String>,
}

impl CollectorConfig {
    /// Returns the effective API base address, trailing slash trimmed.
    pub fn effective_api_base_url(&self) -> String {
        let url = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        url.trim_end_matches('/').to_string()
    }

    /// Returns the effective dataset directory.
    pub fn effective_data_dir(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("data"))
    }

    /// Returns the effective per-endpoint request timeout.
    pub fn effective_request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec.unwrap_or(30))
    }

    /// Returns the effective connectivity-probe timeout.
    pub fn effective_ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_sec.unwrap_or(10))
    }

    /// Returns the effective User-Agent value.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT).to_string()
    }

    /// Rejects values that would make every request fail later anyway.
    pub fn validate(&self) -> Result<(), CollectorError> {
        if let Some(url) = &self.api_base_url {
            if url.trim().is_empty() {
                return Err(CollectorError::Config(
                    "api_base_url must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Load, parse, and validate a JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<CollectorConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: CollectorConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_falls_back_to_defaults() {
        let config: CollectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.effective_api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.effective_data_dir(), PathBuf::from("data"));
        assert_eq!(config.effective_request_timeout(), Duration::from_secs(30));
        assert_eq!(config.effective_ping_timeout(), Duration::from_secs(10));
        assert_eq!(config.effective_user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let config: CollectorConfig = serde_json::from_str(
            r#"{
                "api_base_url": "https://nepse.example.com/api/",
                "data_dir": "/tmp/nepse",
                "request_timeout_sec": 5,
                "ping_timeout_sec": 2,
                "user_agent": "probe/0.1"
            }"#,
        )
        .unwrap();

        // Trailing slash is trimmed so path joins stay single-slashed.
        assert_eq!(config.effective_api_base_url(), "https://nepse.example.com/api");
        assert_eq!(config.effective_data_dir(), PathBuf::from("/tmp/nepse"));
        assert_eq!(config.effective_request_timeout(), Duration::from_secs(5));
        assert_eq!(config.effective_ping_timeout(), Duration::from_secs(2));
        assert_eq!(config.effective_user_agent(), "probe/0.1");
    }

    #[test]
    fn blank_base_url_is_rejected() {
        let config: CollectorConfig =
            serde_json::from_str(r#"{"api_base_url": "  "}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collector.json");
        std::fs::write(&path, r#"{"api_base_url": "http://127.0.0.1:9000"}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.effective_api_base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_config(&path).is_err());
    }
}
