//! Canonical listing paths
//!
//! Every valid [`DimensionSet`] maps to exactly one path:
//!
//! - `/{country}/{state}/listing/{category}/city/{city}`
//! - `/{country}/{state}/listing/{category}[/{vehicle_type}][/brand/{brand}]`
//!
//! The vehicle type always precedes the brand. The builder is pure and never
//! fails; validity is guaranteed by construction of `DimensionSet`.
//!
//! # Examples
//!
//! ```
//! use rentline_engine::canonical::{build_canonical_path, check_request, PathDecision};
//! use rentline_engine::dimensions::DimensionSet;
//!
//! let dims = DimensionSet::builder("ae", "dubai").brand("bmw").build().unwrap();
//! assert_eq!(build_canonical_path(&dims), "/ae/dubai/listing/cars/brand/bmw");
//!
//! match check_request("/ae/dubai/listing/cars/brand/bmw/", &dims) {
//!     PathDecision::Redirect { location, .. } => {
//!         assert_eq!(location, "/ae/dubai/listing/cars/brand/bmw")
//!     }
//!     PathDecision::Render => unreachable!(),
//! }
//! ```

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::dimensions::{DimensionSet, BRAND_SEGMENT, CITY_SEGMENT, LISTING_SEGMENT};

/// HTTP status used for canonical redirects.
pub const CANONICAL_REDIRECT_STATUS: u16 = 308;

/// One navigational dimension, in order of significance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Dimension {
    Country,
    State,
    Category,
    City,
    VehicleType,
    Brand,
}

/// A dimension together with the canonical path that ends at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep<'a> {
    pub dimension: Dimension,
    pub slug: &'a str,
    pub path: String,
}

/// Walk the canonical path of a dimension set one dimension at a time.
///
/// Each step's path extends the previous step's path, so the last step is
/// the canonical path and every earlier step is a valid ancestor page.
pub fn path_trail(dims: &DimensionSet) -> Vec<PathStep<'_>> {
    let mut steps = Vec::with_capacity(5);
    let mut path = format!("/{}", dims.country());
    steps.push(PathStep {
        dimension: Dimension::Country,
        slug: dims.country(),
        path: path.clone(),
    });

    path.push('/');
    path.push_str(dims.state());
    steps.push(PathStep {
        dimension: Dimension::State,
        slug: dims.state(),
        path: path.clone(),
    });

    path.push_str(&format!("/{LISTING_SEGMENT}/{}", dims.category()));
    steps.push(PathStep {
        dimension: Dimension::Category,
        slug: dims.category(),
        path: path.clone(),
    });

    if let Some(city) = dims.city() {
        path.push_str(&format!("/{CITY_SEGMENT}/{city}"));
        steps.push(PathStep {
            dimension: Dimension::City,
            slug: city,
            path,
        });
        return steps;
    }

    if let Some(vehicle_type) = dims.vehicle_type() {
        path.push('/');
        path.push_str(vehicle_type);
        steps.push(PathStep {
            dimension: Dimension::VehicleType,
            slug: vehicle_type,
            path: path.clone(),
        });
    }

    if let Some(brand) = dims.brand() {
        path.push_str(&format!("/{BRAND_SEGMENT}/{brand}"));
        steps.push(PathStep {
            dimension: Dimension::Brand,
            slug: brand,
            path,
        });
    }

    steps
}

/// Build the canonical path for a dimension set.
pub fn build_canonical_path(dims: &DimensionSet) -> String {
    path_trail(dims)
        .pop()
        .map(|step| step.path)
        .unwrap_or_default()
}

/// What the page layer should do with a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathDecision {
    /// The requested path is canonical
    Render,
    /// The requested path must be redirected to `location`
    Redirect { location: String, status: u16 },
}

impl PathDecision {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Compare a requested path against the canonical path of `dims`.
///
/// `dims` should come from the resolved entity data (e.g. the state a
/// vehicle is actually listed in), not from the request itself, so stale
/// links heal themselves. The query string of the request, if any, is kept
/// on the redirect location.
pub fn check_request(requested: &str, dims: &DimensionSet) -> PathDecision {
    let (requested_path, query) = match requested.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (requested, None),
    };
    let canonical = build_canonical_path(dims);

    if requested_path == canonical {
        return PathDecision::Render;
    }

    let location = match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{canonical}?{query}"),
        None => canonical,
    };
    tracing::debug!(requested = %requested, location = %location, "Non-canonical listing path");
    PathDecision::Redirect {
        location,
        status: CANONICAL_REDIRECT_STATUS,
    }
}
