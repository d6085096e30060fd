//! Configuration for the Rentline navigation engine
//!
//! Compile-time constants cover the rules that are part of the page contract
//! (truncation limits, debounce window, default category). Deployment-specific
//! values live in [`SiteConfig`], read from the environment.

use std::time::Duration;

use crate::error::{NavigationError, Result};

/// Category used when a listing URL carries none.
pub const DEFAULT_CATEGORY: &str = "cars";

/// Titles longer than this are truncated for meta-tag previews.
pub const TITLE_MAX_LEN: usize = 60;

/// Descriptions longer than this are truncated for meta-tag previews.
pub const DESCRIPTION_MAX_LEN: usize = 155;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Debounce window for the brand search box (milliseconds).
pub const BRAND_SEARCH_DEBOUNCE_MS: u64 = 300;

/// Default HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Default lifetime of a cached vehicle-type list (seconds).
pub const VEHICLE_TYPE_CACHE_TTL_SECS: u64 = 600;

/// Default public site URL, used for absolute URLs in structured data.
pub const DEFAULT_SITE_URL: &str = "https://www.rentline.example";

/// Default site name, used in fallback titles.
pub const DEFAULT_SITE_NAME: &str = "Rentline";

/// Runtime configuration for a deployment.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL of the marketplace API (no trailing slash)
    pub api_base_url: String,
    /// Public site URL (no trailing slash)
    pub site_url: String,
    /// Brand name shown in titles
    pub site_name: String,
    pub http_timeout: Duration,
    pub vehicle_type_ttl: Duration,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("RENTLINE_API_BASE_URL")
            .map_err(|_| NavigationError::Config("RENTLINE_API_BASE_URL not set".into()))?;

        let site_url =
            std::env::var("RENTLINE_SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.into());

        let site_name =
            std::env::var("RENTLINE_SITE_NAME").unwrap_or_else(|_| DEFAULT_SITE_NAME.into());

        let http_timeout_secs: u64 = std::env::var("RENTLINE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        let vehicle_type_ttl_secs: u64 = std::env::var("RENTLINE_VEHICLE_TYPE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(VEHICLE_TYPE_CACHE_TTL_SECS);

        Ok(Self::new(api_base_url)
            .with_site_url(site_url)
            .with_site_name(site_name)
            .with_http_timeout(Duration::from_secs(http_timeout_secs))
            .with_vehicle_type_ttl(Duration::from_secs(vehicle_type_ttl_secs)))
    }

    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: trim_trailing_slash(api_base_url.into()),
            site_url: DEFAULT_SITE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            vehicle_type_ttl: Duration::from_secs(VEHICLE_TYPE_CACHE_TTL_SECS),
        }
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = trim_trailing_slash(site_url.into());
        self
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = site_name.into();
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_vehicle_type_ttl(mut self, ttl: Duration) -> Self {
        self.vehicle_type_ttl = ttl;
        self
    }

    /// Absolute URL for a site path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }
}

fn trim_trailing_slash(mut s: String) -> String {
    while s.ends_with('/') {
        s.pop();
    }
    s
}
