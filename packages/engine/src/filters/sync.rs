//! Filter state ⇄ URL synchronization
//!
//! The URL query string is the source of truth for applied filters. The
//! synchronizer keeps an in-memory selection that the user edits freely
//! (`Dirty`) and only writes back on [`FilterSynchronizer::apply_filters`].
//! Price and period are the exception: they are written to the URL as soon
//! as they change.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use super::query::{decode_selection, merge_selection, QueryParams, PAGE_KEY};
use super::selection::{FilterKey, FilterKind, FilterSelection, FilterValue, Period, PriceRange};
use crate::error::{NavigationError, Result};

/// Whether the in-memory selection matches the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncState {
    Idle,
    /// Selection changed in memory but not yet applied
    Dirty,
}

/// Keeps a filter selection in sync with the listing URL query.
#[derive(Debug, Clone)]
pub struct FilterSynchronizer {
    url: QueryParams,
    selected: FilterSelection,
    state: SyncState,
    uncheckable: BTreeSet<FilterKey>,
}

impl FilterSynchronizer {
    /// Hydrate from the current URL query string.
    pub fn from_query(query: &str) -> Self {
        let url = QueryParams::parse(query);
        let selected = decode_selection(&url);
        Self {
            url,
            selected,
            state: SyncState::Idle,
            uncheckable: FilterKey::all()
                .filter(|key| key.allows_uncheck_by_default())
                .collect(),
        }
    }

    /// Allow or forbid clearing a single-choice filter by re-selecting it.
    pub fn with_allow_uncheck(mut self, key: FilterKey, allow: bool) -> Self {
        if allow {
            self.uncheckable.insert(key);
        } else {
            self.uncheckable.remove(&key);
        }
        self
    }

    /// Current in-memory selection, including unapplied changes.
    pub fn selected_filters(&self) -> &FilterSelection {
        &self.selected
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Current URL query string (without `?`).
    pub fn query_string(&self) -> String {
        self.url.to_string()
    }

    pub fn url_params(&self) -> &QueryParams {
        &self.url
    }

    /// Change one filter in memory.
    ///
    /// Single-choice filters replace their value (or clear it when
    /// re-selecting an uncheckable value); multi-choice filters toggle
    /// membership. Price and period go straight to the URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterValue` if `value` is an empty choice or does not
    /// fit the filter kind.
    pub fn handle_filter_change(&mut self, key: FilterKey, value: FilterValue) -> Result<()> {
        if let FilterValue::Choice(choice) = &value {
            if choice.trim().is_empty() {
                return Err(NavigationError::InvalidFilterValue {
                    key: key.to_string(),
                    reason: "choice must not be empty".to_string(),
                });
            }
        }

        match (key.kind(), value) {
            (FilterKind::Single, FilterValue::Choice(choice)) => {
                let uncheck = self.uncheckable.contains(&key);
                if let Some(slot) = self.selected.single_mut(key) {
                    if uncheck && slot.as_deref() == Some(choice.as_str()) {
                        *slot = None;
                    } else {
                        *slot = Some(choice);
                    }
                }
                self.mark_dirty(key);
                Ok(())
            }
            (FilterKind::Multi, FilterValue::Choice(choice)) => {
                if let Some(set) = self.selected.multi_mut(key) {
                    if !set.remove(&choice) {
                        set.insert(choice);
                    }
                }
                self.mark_dirty(key);
                Ok(())
            }
            (FilterKind::Price, FilterValue::Price(range)) => {
                self.set_price(Some(range));
                Ok(())
            }
            (FilterKind::Period, FilterValue::Period(period)) => {
                self.set_period(Some(period));
                Ok(())
            }
            (kind, value) => Err(NavigationError::InvalidFilterValue {
                key: key.to_string(),
                reason: format!("{value:?} does not fit a {kind:?} filter"),
            }),
        }
    }

    /// Write the selection to the URL and return the new query string.
    ///
    /// `page` is dropped so the listing restarts from the first page;
    /// non-filter keys are preserved.
    pub fn apply_filters(&mut self) -> String {
        let mut url = merge_selection(&self.url, &self.selected);
        url.remove(PAGE_KEY);
        self.url = url;
        self.state = SyncState::Idle;
        let query = self.url.to_string();
        info!(query = %query, "Applied filters");
        query
    }

    /// Clear the selection and every filter key in the URL.
    pub fn reset_filters(&mut self) -> String {
        self.selected = FilterSelection::new();
        self.url.remove_filters();
        self.url.remove(PAGE_KEY);
        self.state = SyncState::Idle;
        let query = self.url.to_string();
        info!(query = %query, "Reset filters");
        query
    }

    /// Number of filters applied in the URL, not counting `period` and `page`.
    ///
    /// Values the decoder ignores (empty or malformed) are not counted.
    pub fn applied_filter_count(&self) -> usize {
        decode_selection(&self.url)
            .active_keys()
            .into_iter()
            .filter(|key| *key != FilterKey::Period)
            .count()
    }

    /// Set or clear the price range, writing it to the URL immediately.
    pub fn set_price(&mut self, range: Option<PriceRange>) {
        self.selected.price = range;
        match range {
            Some(range) => self.url.set(FilterKey::Price.as_ref(), range.to_string()),
            None => self.url.remove(FilterKey::Price.as_ref()),
        }
        self.url.remove(PAGE_KEY);
        debug!(price = ?range, "Price written to URL");
    }

    /// Set or clear the rental period, writing it to the URL immediately.
    pub fn set_period(&mut self, period: Option<Period>) {
        self.selected.period = period;
        match period {
            Some(period) => self.url.set(FilterKey::Period.as_ref(), period.to_string()),
            None => self.url.remove(FilterKey::Period.as_ref()),
        }
        self.url.remove(PAGE_KEY);
        debug!(period = ?period, "Period written to URL");
    }

    /// Reconcile an external URL change (back/forward navigation, shared link).
    ///
    /// Unapplied in-memory changes are discarded.
    pub fn sync_from_url(&mut self, query: &str) {
        if self.state == SyncState::Dirty {
            debug!("Discarding unapplied filter changes after URL change");
        }
        self.url = QueryParams::parse(query);
        self.selected = decode_selection(&self.url);
        self.state = SyncState::Idle;
    }

    fn mark_dirty(&mut self, key: FilterKey) {
        self.state = SyncState::Dirty;
        debug!(filter = %key, "Filter changed");
    }
}
