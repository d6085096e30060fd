//! Listing dimensions and combination validation
//!
//! A [`DimensionSet`] identifies a listing page: country, state and category
//! are always present, optionally narrowed either by `city` or by any mix of
//! `vehicle_type` and `brand`. The two groups are mutually exclusive.
//!
//! A `DimensionSet` can only be obtained through [`DimensionSetBuilder::build`],
//! [`DimensionSet::from_path`] or deserialization, all of which validate, so
//! every value in circulation satisfies the combination rule.
//!
//! # Examples
//!
//! ```
//! use rentline_engine::dimensions::{is_valid_combination, DimensionSet};
//!
//! assert!(is_valid_combination(Some("suv"), Some("bmw"), None));
//! assert!(!is_valid_combination(None, Some("bmw"), Some("marina")));
//!
//! let dims = DimensionSet::from_path("/ae/dubai/listing/cars/brand/bmw").unwrap();
//! assert_eq!(dims.brand(), Some("bmw"));
//! assert_eq!(dims.vehicle_type(), None);
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CATEGORY;
use crate::error::{NavigationError, Result};

/// Lower-case alphanumeric words separated by single hyphens.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid regex"));

/// Two-letter country code.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COUNTRY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}$").expect("valid regex"));

/// Path segment introducing the listing dimensions.
pub const LISTING_SEGMENT: &str = "listing";
/// Path segment introducing a brand slug.
pub const BRAND_SEGMENT: &str = "brand";
/// Path segment introducing a city slug.
pub const CITY_SEGMENT: &str = "city";

/// Segments with structural meaning that can never be a vehicle type.
const RESERVED_VEHICLE_TYPES: &[&str] = &[LISTING_SEGMENT, BRAND_SEGMENT, CITY_SEGMENT];

/// Check whether the optional dimensions form a legal combination.
///
/// Returns `false` iff `city` is present together with `vehicle_type` or
/// `brand`. Every other combination, including none at all, is valid.
pub fn is_valid_combination(
    vehicle_type: Option<&str>,
    brand: Option<&str>,
    city: Option<&str>,
) -> bool {
    !(city.is_some() && (vehicle_type.is_some() || brand.is_some()))
}

/// Validated navigational identity of a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "DimensionSetBuilder")]
pub struct DimensionSet {
    country: String,
    state: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
}

impl DimensionSet {
    /// Start building a dimension set for a country and state.
    pub fn builder(country: impl Into<String>, state: impl Into<String>) -> DimensionSetBuilder {
        DimensionSetBuilder {
            country: Some(country.into()),
            state: Some(state.into()),
            ..DimensionSetBuilder::default()
        }
    }

    /// Parse a listing path into a dimension set.
    ///
    /// Accepted shapes:
    /// - `/{country}/{state}/listing[/{category}]`
    /// - `/{country}/{state}/listing/{category}/city/{city}`
    /// - `/{country}/{state}/listing/{category}[/{vehicle_type}][/brand/{brand}]`
    ///
    /// Query strings and fragments are ignored. Empty segments (trailing or
    /// doubled slashes) are skipped and segments are lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::InvalidPath` for any other shape, plus the
    /// validation errors of [`DimensionSetBuilder::build`].
    pub fn from_path(path: &str) -> Result<Self> {
        let path_only = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<String> = path_only
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        let (country, state, rest) = match segments.as_slice() {
            [country, state, listing, rest @ ..] if listing == LISTING_SEGMENT => {
                (country, state, rest)
            }
            _ => {
                return Err(NavigationError::InvalidPath(format!(
                    "expected /{{country}}/{{state}}/listing/..., got: {path}"
                )))
            }
        };

        let mut builder = DimensionSet::builder(country.as_str(), state.as_str());
        match rest {
            [] => {}
            [category] => builder = builder.category(category.as_str()),
            [category, marker, city] if marker == CITY_SEGMENT => {
                builder = builder.category(category.as_str()).city(city.as_str());
            }
            [category, marker, brand] if marker == BRAND_SEGMENT => {
                builder = builder.category(category.as_str()).brand(brand.as_str());
            }
            [category, vehicle_type] => {
                builder = builder
                    .category(category.as_str())
                    .vehicle_type(vehicle_type.as_str());
            }
            [category, vehicle_type, marker, brand] if marker == BRAND_SEGMENT => {
                builder = builder
                    .category(category.as_str())
                    .vehicle_type(vehicle_type.as_str())
                    .brand(brand.as_str());
            }
            _ => {
                return Err(NavigationError::InvalidPath(format!(
                    "unrecognized listing segments in: {path}"
                )))
            }
        }
        builder.build()
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Copy of this set with a different state, e.g. after resolving the
    /// real state of a vehicle behind a stale link.
    pub fn with_state(&self, state: impl Into<String>) -> Result<Self> {
        DimensionSetBuilder::from(self.clone()).state(state).build()
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::canonical::build_canonical_path(self))
    }
}

/// Builder (and unvalidated wire form) of a [`DimensionSet`].
///
/// Empty strings count as absent, so a blank `?brand=` never becomes a
/// dimension.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSetBuilder {
    country: Option<String>,
    state: Option<String>,
    category: Option<String>,
    vehicle_type: Option<String>,
    brand: Option<String>,
    city: Option<String>,
}

impl DimensionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = Some(vehicle_type.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Validate and build the dimension set.
    ///
    /// # Errors
    ///
    /// - `MissingDimension` if country or state is absent
    /// - `InvalidSlug` if any value is not a lower-case slug (input is
    ///   trimmed and lower-cased first) or a vehicle type is reserved
    /// - `InvalidCombination` if `city` is combined with `vehicle_type`/`brand`
    pub fn build(self) -> Result<DimensionSet> {
        let country = normalize(self.country).ok_or(NavigationError::MissingDimension("country"))?;
        if !COUNTRY_PATTERN.is_match(&country) {
            return Err(NavigationError::InvalidSlug {
                dimension: "country",
                value: country,
            });
        }

        let state = normalize(self.state).ok_or(NavigationError::MissingDimension("state"))?;
        let state = validate_slug("state", state)?;

        let category = normalize(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        let category = validate_slug("category", category)?;

        let vehicle_type = normalize(self.vehicle_type)
            .map(|v| validate_slug("vehicle type", v))
            .transpose()?;
        if let Some(vt) = vehicle_type.as_deref() {
            if RESERVED_VEHICLE_TYPES.contains(&vt) {
                return Err(NavigationError::InvalidSlug {
                    dimension: "vehicle type",
                    value: vt.to_string(),
                });
            }
        }

        let brand = normalize(self.brand)
            .map(|v| validate_slug("brand", v))
            .transpose()?;
        let city = normalize(self.city)
            .map(|v| validate_slug("city", v))
            .transpose()?;

        if !is_valid_combination(vehicle_type.as_deref(), brand.as_deref(), city.as_deref()) {
            tracing::error!(
                city = ?city,
                vehicle_type = ?vehicle_type,
                brand = ?brand,
                "Rejected listing dimensions: city combined with vehicle type or brand"
            );
            return Err(NavigationError::InvalidCombination {
                city: city.unwrap_or_default(),
                vehicle_type,
                brand,
            });
        }

        Ok(DimensionSet {
            country,
            state,
            category,
            vehicle_type,
            brand,
            city,
        })
    }
}

impl From<DimensionSet> for DimensionSetBuilder {
    fn from(dims: DimensionSet) -> Self {
        Self {
            country: Some(dims.country),
            state: Some(dims.state),
            category: Some(dims.category),
            vehicle_type: dims.vehicle_type,
            brand: dims.brand,
            city: dims.city,
        }
    }
}

impl TryFrom<DimensionSetBuilder> for DimensionSet {
    type Error = NavigationError;

    fn try_from(builder: DimensionSetBuilder) -> Result<Self> {
        builder.build()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

fn validate_slug(dimension: &'static str, value: String) -> Result<String> {
    if SLUG_PATTERN.is_match(&value) {
        Ok(value)
    } else {
        Err(NavigationError::InvalidSlug { dimension, value })
    }
}
