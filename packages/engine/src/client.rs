//! Marketplace API client
//!
//! The engine talks to the marketplace API only through [`ApiClient`]:
//! `GET(path, country) -> JSON`. [`HttpApiClient`] is the reqwest-backed
//! implementation; tests use [`test_support::MockApiClient`].
//!
//! Retries belong to the client, not to its callers. `HttpApiClient` makes
//! one attempt per call: listing pages prefer a fast fallback over a slow
//! retried lookup.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::error::{NavigationError, Result};

/// Header carrying the marketplace country.
pub const COUNTRY_HEADER: &str = "x-country";

/// User agent string identifying this engine.
const USER_AGENT: &str = concat!("rentline-engine/", env!("CARGO_PKG_VERSION"));

/// Trait for marketplace API clients, enabling mocking in tests.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch `path` (including its query string) for `country`.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and unparseable bodies.
    async fn get_json(&self, path: &str, country: &str) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: ApiClient + ?Sized> ApiClient for std::sync::Arc<T> {
    async fn get_json(&self, path: &str, country: &str) -> Result<serde_json::Value> {
        (**self).get_json(path, country).await
    }
}

/// Standard `{ "result": ... }` envelope returned by the marketplace API.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub result: Option<T>,
}

/// Decode the `result` field of an API response.
///
/// Returns `Ok(None)` when `result` is absent or null.
pub fn decode_result<T: DeserializeOwned>(body: serde_json::Value) -> Result<Option<T>> {
    let envelope: ApiEnvelope<T> = serde_json::from_value(body)?;
    Ok(envelope.result)
}

/// reqwest-backed API client.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_json(&self, path: &str, country: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, country, "API request");

        let resp = self
            .http
            .get(&url)
            .header(COUNTRY_HEADER, country)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp.text().await?;

        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "API returned non-success status");
            return Err(NavigationError::Api {
                status: status.as_u16(),
                message: body_text,
            });
        }

        Ok(serde_json::from_str(&body_text)?)
    }
}

/// Test utilities for the API client.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_support {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock API client: canned responses by exact path, with a request log.
    #[derive(Default)]
    pub struct MockApiClient {
        responses: HashMap<String, serde_json::Value>,
        requests: Mutex<Vec<String>>,
    }

    impl MockApiClient {
        pub fn new() -> Self {
            Self::default()
        }

        /// Respond to `path` with `body` (HTTP 200).
        pub fn with_response(mut self, path: &str, body: serde_json::Value) -> Self {
            self.responses.insert(path.to_string(), body);
            self
        }

        /// Paths requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests
                .lock()
                .map(|r| r.clone())
                .unwrap_or_default()
        }
    }

    #[async_trait]
    impl ApiClient for MockApiClient {
        async fn get_json(&self, path: &str, _country: &str) -> Result<serde_json::Value> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(path.to_string());
            }
            self.responses
                .get(path)
                .cloned()
                .ok_or_else(|| NavigationError::Api {
                    status: 404,
                    message: format!("no mock response for {path}"),
                })
        }
    }
}
