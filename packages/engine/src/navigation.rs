//! Discarding stale resolutions
//!
//! A metadata lookup can finish after the user has already moved on to
//! another listing. [`NavigationSession`] remembers which dimension set is
//! currently displayed; results are keyed by the dimension set that started
//! them and dropped if it no longer matches.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::dimensions::DimensionSet;

/// Handle for one in-flight resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
    dims: DimensionSet,
}

impl ResolutionTicket {
    pub fn dimensions(&self) -> &DimensionSet {
        &self.dims
    }
}

/// Tracks the current navigation target of one client.
///
/// The lock is only held for the comparison, never across an await.
#[derive(Debug, Default)]
pub struct NavigationSession {
    current: Mutex<Option<DimensionSet>>,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation to `dims` and return the ticket for its resolution.
    pub fn navigate(&self, dims: DimensionSet) -> ResolutionTicket {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(dims.clone());
        ResolutionTicket { dims }
    }

    /// Currently displayed dimension set, if any.
    pub fn current(&self) -> Option<DimensionSet> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_current(&self, ticket: &ResolutionTicket) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            == Some(&ticket.dims)
    }

    /// Hand back `value` only if the ticket still matches current navigation.
    pub fn accept<T>(&self, ticket: &ResolutionTicket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            debug!(stale = %ticket.dims, "Discarding stale resolution");
            None
        }
    }
}
