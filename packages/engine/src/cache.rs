//! Vehicle-type option cache
//!
//! Vehicle-type lists change rarely but are needed on every filter sidebar.
//! Entries are keyed by `(category, state)` and expire after a fixed TTL.
//! The cache is an explicit value passed by reference; there is no global.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::client::{decode_result, ApiClient};
use crate::config::{SiteConfig, VEHICLE_TYPE_CACHE_TTL_SECS};
use crate::error::Result;
use crate::filters::FilterOption;

/// Vehicle-type list endpoint.
pub const VEHICLE_TYPE_LIST_ENDPOINT: &str = "/vehicle-type/list";

/// Request path for the vehicle types of `category` in `state`.
pub fn vehicle_type_list_path(category: &str, state: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("category", category)
        .append_pair("state", state)
        .finish();
    format!("{VEHICLE_TYPE_LIST_ENDPOINT}?{query}")
}

type CacheKey = (String, String);

#[derive(Debug, Clone)]
struct CacheEntry {
    fetched_at: Instant,
    options: Vec<FilterOption>,
}

#[derive(Debug)]
pub struct VehicleTypeCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl Default for VehicleTypeCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(VEHICLE_TYPE_CACHE_TTL_SECS))
    }
}

impl VehicleTypeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.vehicle_type_ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh cached options, if any.
    pub fn get(&self, category: &str, state: &str) -> Option<Vec<FilterOption>> {
        let key = (category.to_string(), state.to_string());
        let entries = self.lock();
        entries
            .get(&key)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.options.clone())
    }

    pub fn insert(&self, category: &str, state: &str, options: Vec<FilterOption>) {
        self.lock().insert(
            (category.to_string(), state.to_string()),
            CacheEntry {
                fetched_at: Instant::now(),
                options,
            },
        );
    }

    pub fn invalidate(&self, category: &str, state: &str) {
        self.lock()
            .remove(&(category.to_string(), state.to_string()));
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Cached options, fetching them on a miss or after expiry.
    ///
    /// The lock is released while the request is in flight, so two
    /// concurrent misses may both fetch; the later write wins. Failed
    /// fetches are not cached.
    ///
    /// # Errors
    ///
    /// Propagates client and decoding errors.
    pub async fn get_or_fetch<C: ApiClient + ?Sized>(
        &self,
        client: &C,
        country: &str,
        category: &str,
        state: &str,
    ) -> Result<Vec<FilterOption>> {
        if let Some(options) = self.get(category, state) {
            debug!(category, state, "Vehicle types served from cache");
            return Ok(options);
        }

        let body = client
            .get_json(&vehicle_type_list_path(category, state), country)
            .await?;
        let options: Vec<FilterOption> = decode_result(body)?.unwrap_or_default();
        debug!(category, state, count = options.len(), "Fetched vehicle types");

        self.insert(category, state, options.clone());
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockApiClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SUV_PATH: &str = "/vehicle-type/list?category=cars&state=dubai";

    fn client() -> MockApiClient {
        MockApiClient::new().with_response(
            SUV_PATH,
            json!({"result": [{"name": "SUV", "value": "suv"}, {"name": "Sedan", "value": "sedan"}]}),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_lookup_hits_cache() {
        let client = client();
        let cache = VehicleTypeCache::default();

        let first = cache.get_or_fetch(&client, "ae", "cars", "dubai").await.unwrap();
        let second = cache.get_or_fetch(&client, "ae", "cars", "dubai").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0], FilterOption::new("SUV", "suv"));
        assert_eq!(client.requests(), vec![SUV_PATH]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let client = client();
        let cache = VehicleTypeCache::new(Duration::from_secs(600));
        cache.get_or_fetch(&client, "ae", "cars", "dubai").await.unwrap();

        tokio::time::advance(Duration::from_secs(599)).await;
        assert!(cache.get("cars", "dubai").is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("cars", "dubai").is_none());

        cache.get_or_fetch(&client, "ae", "cars", "dubai").await.unwrap();
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = VehicleTypeCache::default();
        cache.insert("cars", "dubai", vec![FilterOption::new("SUV", "suv")]);
        assert!(cache.get("cars", "abu-dhabi").is_none());
        assert!(cache.get("bikes", "dubai").is_none());

        cache.invalidate("cars", "dubai");
        assert!(cache.get("cars", "dubai").is_none());
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let client = MockApiClient::new();
        let cache = VehicleTypeCache::default();
        assert!(cache
            .get_or_fetch(&client, "ae", "cars", "sharjah")
            .await
            .is_err());
        assert!(cache.get("cars", "sharjah").is_none());
    }

    #[test]
    fn test_request_path() {
        assert_eq!(
            vehicle_type_list_path("cars", "abu-dhabi"),
            "/vehicle-type/list?category=cars&state=abu-dhabi"
        );
    }
}
