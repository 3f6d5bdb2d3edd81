//! HTTP collaborator for the upstream API.
//!
//! One [`ApiClient`] is built per run with the session headers the API
//! expects. The connectivity probe reports `bool` and never fails the run;
//! per-endpoint fetches surface timeouts, HTTP status errors, and
//! malformed bodies as [`CollectorError::Http`].

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::warn;

use nepse_core::config::CollectorConfig;
use nepse_core::error::CollectorError;

use crate::endpoint::Endpoint;

/// HTTP client bound to one API base address.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    ping_timeout: Duration,
    request_timeout: Duration,
}

impl ApiClient {
    /// Build a client from the collector config.
    pub fn new(config: &CollectorConfig) -> Result<Self, CollectorError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.effective_user_agent())
            .default_headers(headers)
            .build()
            .map_err(|e| CollectorError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.effective_api_base_url(),
            ping_timeout: config.effective_ping_timeout(),
            request_timeout: config.effective_request_timeout(),
        })
    }

    /// The base address requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the API root for reachability.
    ///
    /// Returns `false` on any failure; the reason is logged, not
    /// propagated.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/", self.base_url);
        match self.http.get(&url).timeout(self.ping_timeout).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!("connectivity probe: API returned status {}", response.status());
                false
            }
            Err(e) => {
                warn!("connectivity probe: cannot reach API: {e}");
                false
            }
        }
    }

    /// Fetch one endpoint's payload as raw JSON.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Value, CollectorError> {
        let url = self.endpoint_url(endpoint);
        let response = self
            .http
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| CollectorError::Http(format!("{endpoint}: request failed: {e}")))?
            .error_for_status()
            .map_err(|e| CollectorError::Http(format!("{endpoint}: {e}")))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| CollectorError::Http(format!("{endpoint}: malformed JSON body: {e}")))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base: &str) -> ApiClient {
        let config =
            CollectorConfig { api_base_url: Some(base.to_string()), ..Default::default() };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn endpoint_urls_join_cleanly() {
        let client = client_for("http://localhost:8000");
        assert_eq!(client.endpoint_url(Endpoint::Floorsheet), "http://localhost:8000/Floorsheet");

        // A configured trailing slash must not double up.
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.endpoint_url(Endpoint::NepseIndex), "http://localhost:8000/NepseIndex");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn timeouts_come_from_config() {
        let config = CollectorConfig {
            api_base_url: Some("http://localhost:8000".to_string()),
            request_timeout_sec: Some(7),
            ping_timeout_sec: Some(3),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.request_timeout, Duration::from_secs(7));
        assert_eq!(client.ping_timeout, Duration::from_secs(3));
    }
}
