//! Query string codec for filter selections
//!
//! Multi-valued filters are written as repeated keys
//! (`color=red&color=blue`) and decoded in any order. Keys that are not
//! filters (`page`, tracking parameters, ...) pass through untouched.

use std::fmt;

use tracing::warn;

use super::selection::{FilterKey, FilterKind, FilterSelection, PriceRange};

/// Pagination key; dropped whenever the filter selection changes.
pub const PAGE_KEY: &str = "page";

/// Ordered query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Drop every pair for `key`.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Replace all values for `key` with a single one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.remove(key);
        self.append(key, value);
    }

    /// Drop every filter key, keeping everything else in order.
    pub fn remove_filters(&mut self) {
        self.pairs.retain(|(k, _)| k.parse::<FilterKey>().is_err());
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        f.write_str(&serializer.finish())
    }
}

/// Hydrate a selection from query parameters.
///
/// Malformed values are logged and skipped; a bad `price` never takes the
/// rest of the selection down with it.
pub fn decode_selection(params: &QueryParams) -> FilterSelection {
    let mut selection = FilterSelection::new();

    for key in FilterKey::all() {
        let name = key.as_ref();
        match key.kind() {
            FilterKind::Single => {
                if let (Some(value), Some(slot)) = (
                    params.get(name).filter(|v| !v.trim().is_empty()),
                    selection.single_mut(key),
                ) {
                    *slot = Some(value.to_string());
                }
            }
            FilterKind::Multi => {
                if let Some(set) = selection.multi_mut(key) {
                    set.extend(
                        params
                            .get_all(name)
                            .filter(|v| !v.trim().is_empty())
                            .map(str::to_string),
                    );
                }
            }
            FilterKind::Price => {
                if let Some(raw) = params.get(name) {
                    match raw.parse::<PriceRange>() {
                        Ok(range) => selection.price = Some(range),
                        Err(e) => warn!(value = raw, error = %e, "Ignoring malformed price filter"),
                    }
                }
            }
            FilterKind::Period => {
                if let Some(raw) = params.get(name) {
                    match raw.parse() {
                        Ok(period) => selection.period = Some(period),
                        Err(_) => warn!(value = raw, "Ignoring unknown rental period"),
                    }
                }
            }
        }
    }

    selection
}

/// Query pairs for a selection, in filter-key order.
///
/// Blank values are skipped, since decoding would drop them anyway.
pub fn encode_selection(selection: &FilterSelection) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for key in FilterKey::all() {
        let name = key.as_ref();
        match key.kind() {
            FilterKind::Single => {
                if let Some(value) = selection.single(key).filter(|v| !v.trim().is_empty()) {
                    pairs.push((name.to_string(), value.to_string()));
                }
            }
            FilterKind::Multi => {
                if let Some(set) = selection.multi(key) {
                    pairs.extend(
                        set.iter()
                            .filter(|v| !v.trim().is_empty())
                            .map(|v| (name.to_string(), v.clone())),
                    );
                }
            }
            FilterKind::Price => {
                if let Some(range) = selection.price {
                    pairs.push((name.to_string(), range.to_string()));
                }
            }
            FilterKind::Period => {
                if let Some(period) = selection.period {
                    pairs.push((name.to_string(), period.to_string()));
                }
            }
        }
    }
    pairs
}

/// Write `selection` into `params`, replacing all filter keys.
///
/// Non-filter keys keep their relative order and come first.
pub fn merge_selection(params: &QueryParams, selection: &FilterSelection) -> QueryParams {
    let mut merged = params.clone();
    merged.remove_filters();
    for (key, value) in encode_selection(selection) {
        merged.append(key, value);
    }
    merged
}
