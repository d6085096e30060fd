//! Debounced brand search for the filter sidebar

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use super::selection::FilterOption;
use crate::client::{decode_result, ApiClient};
use crate::config::BRAND_SEARCH_DEBOUNCE_MS;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::labels::title_case;

/// Brand search endpoint.
pub const BRAND_LIST_ENDPOINT: &str = "/brand/list";

/// Request path for a brand search.
pub fn brand_list_path(category: &str, search: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("category", category)
        .append_pair("search", search)
        .finish();
    format!("{BRAND_LIST_ENDPOINT}?{query}")
}

/// Fetch brands of `category` matching `search`.
///
/// An absent `result` is an empty list.
pub async fn fetch_brands<C: ApiClient + ?Sized>(
    client: &C,
    country: &str,
    category: &str,
    search: &str,
) -> Result<Vec<FilterOption>> {
    let body = client
        .get_json(&brand_list_path(category, search), country)
        .await?;
    Ok(decode_result(body)?.unwrap_or_default())
}

/// Brand search box state.
///
/// Every keystroke reschedules the lookup; only the last term within the
/// debounce window reaches the API.
pub struct BrandSearch<C> {
    client: Arc<C>,
    country: String,
    category: String,
    debouncer: Debouncer,
    results: Arc<Mutex<Vec<FilterOption>>>,
}

impl<C: ApiClient + 'static> BrandSearch<C> {
    pub fn new(client: Arc<C>, country: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            client,
            country: country.into(),
            category: category.into(),
            debouncer: Debouncer::new(Duration::from_millis(BRAND_SEARCH_DEBOUNCE_MS)),
            results: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Override the debounce window.
    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Record a new search term and schedule the lookup.
    pub fn set_search_term(&mut self, term: &str) {
        let term = term.trim().to_string();
        let client = Arc::clone(&self.client);
        let results = Arc::clone(&self.results);
        let country = self.country.clone();
        let category = self.category.clone();

        self.debouncer.schedule(async move {
            let options = match fetch_brands(client.as_ref(), &country, &category, &term).await {
                Ok(options) => {
                    debug!(search = %term, count = options.len(), "Brand search finished");
                    options
                }
                Err(e) => {
                    warn!(search = %term, error = %e, "Brand search failed");
                    Vec::new()
                }
            };
            *results.lock().unwrap_or_else(PoisonError::into_inner) = options;
        });
    }

    /// Whether a lookup is waiting for the debounce window or in flight.
    pub fn is_searching(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Latest search results.
    pub fn results(&self) -> Vec<FilterOption> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Options to show: the latest results, with the selected brand
    /// prepended when the search no longer returns it.
    pub fn displayed_options(&self, selected: Option<&str>) -> Vec<FilterOption> {
        let mut options = self.results();
        if let Some(selected) = selected {
            if !options.iter().any(|option| option.value == selected) {
                options.insert(0, FilterOption::new(title_case(selected), selected));
            }
        }
        options
    }

    /// Abort the pending lookup.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }
}
