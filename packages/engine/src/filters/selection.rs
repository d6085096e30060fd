//! Facet filter selection model

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{NavigationError, Result};

/// A facet filter, named as in the URL query string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FilterKey {
    Category,
    VehicleType,
    Brand,
    ModelYear,
    Seats,
    Transmission,
    FuelType,
    Color,
    Price,
    Period,
}

/// How a filter holds its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// At most one value; a new choice replaces the old one
    Single,
    /// A set of values; choosing toggles membership
    Multi,
    /// `[min, max]` price range
    Price,
    /// Rental period
    Period,
}

impl FilterKey {
    pub fn kind(self) -> FilterKind {
        match self {
            Self::Category | Self::VehicleType | Self::Brand | Self::Seats => FilterKind::Single,
            Self::ModelYear | Self::Transmission | Self::FuelType | Self::Color => {
                FilterKind::Multi
            }
            Self::Price => FilterKind::Price,
            Self::Period => FilterKind::Period,
        }
    }

    /// Whether re-selecting the active value clears a single-choice filter
    /// by default.
    pub fn allows_uncheck_by_default(self) -> bool {
        matches!(self, Self::Brand | Self::VehicleType)
    }

    /// Human-readable section title.
    pub fn title(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::VehicleType => "Vehicle Type",
            Self::Brand => "Brand",
            Self::ModelYear => "Model Year",
            Self::Seats => "Seats",
            Self::Transmission => "Transmission",
            Self::FuelType => "Fuel Type",
            Self::Color => "Color",
            Self::Price => "Price",
            Self::Period => "Rental Period",
        }
    }

    /// All filter keys in query-string order.
    pub fn all() -> impl Iterator<Item = FilterKey> {
        Self::iter()
    }
}

/// Rental period the price range refers to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    Hour,
    #[default]
    Day,
    Week,
    Month,
}

/// Inclusive price range, serialized as `"{min}-{max}"`.
///
/// `min <= max` always holds: [`PriceRange::new`] and parsing are the only
/// ways to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Create a range; bounds given in the wrong order are swapped.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl From<PriceRange> for String {
    fn from(range: PriceRange) -> Self {
        range.to_string()
    }
}

impl TryFrom<String> for PriceRange {
    type Error = NavigationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl FromStr for PriceRange {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || NavigationError::InvalidQuery(format!("price must be 'min-max', got: {s}"));
        let (min, max) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min: u32 = min.trim().parse().map_err(|_| invalid())?;
        let max: u32 = max.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(min, max))
    }
}

/// A selectable option in a filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Display name
    pub name: String,
    /// Value written to the URL
    pub value: String,
}

impl FilterOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Value passed to a filter change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// One option of a single- or multi-choice filter
    Choice(String),
    Price(PriceRange),
    Period(Period),
}

/// Current facet filter selection.
///
/// Multi-choice filters are sets, so selection order never matters for
/// equality or serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub category: Option<String>,
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub seats: Option<String>,
    pub model_year: BTreeSet<String>,
    pub transmission: BTreeSet<String>,
    pub fuel_type: BTreeSet<String>,
    pub color: BTreeSet<String>,
    pub price: Option<PriceRange>,
    pub period: Option<Period>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a single-choice filter.
    pub fn single(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Category => self.category.as_deref(),
            FilterKey::VehicleType => self.vehicle_type.as_deref(),
            FilterKey::Brand => self.brand.as_deref(),
            FilterKey::Seats => self.seats.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn single_mut(&mut self, key: FilterKey) -> Option<&mut Option<String>> {
        match key {
            FilterKey::Category => Some(&mut self.category),
            FilterKey::VehicleType => Some(&mut self.vehicle_type),
            FilterKey::Brand => Some(&mut self.brand),
            FilterKey::Seats => Some(&mut self.seats),
            _ => None,
        }
    }

    /// Values of a multi-choice filter.
    pub fn multi(&self, key: FilterKey) -> Option<&BTreeSet<String>> {
        match key {
            FilterKey::ModelYear => Some(&self.model_year),
            FilterKey::Transmission => Some(&self.transmission),
            FilterKey::FuelType => Some(&self.fuel_type),
            FilterKey::Color => Some(&self.color),
            _ => None,
        }
    }

    pub(crate) fn multi_mut(&mut self, key: FilterKey) -> Option<&mut BTreeSet<String>> {
        match key {
            FilterKey::ModelYear => Some(&mut self.model_year),
            FilterKey::Transmission => Some(&mut self.transmission),
            FilterKey::FuelType => Some(&mut self.fuel_type),
            FilterKey::Color => Some(&mut self.color),
            _ => None,
        }
    }

    /// Whether `value` is currently selected for `key`.
    pub fn is_selected(&self, key: FilterKey, value: &str) -> bool {
        match key.kind() {
            FilterKind::Single => self.single(key) == Some(value),
            FilterKind::Multi => self.multi(key).is_some_and(|set| set.contains(value)),
            FilterKind::Price => self.price.is_some_and(|p| p.to_string() == value),
            FilterKind::Period => self.period.is_some_and(|p| p.as_ref() == value),
        }
    }

    /// Whether `key` carries any value.
    pub fn is_active(&self, key: FilterKey) -> bool {
        match key.kind() {
            FilterKind::Single => self.single(key).is_some(),
            FilterKind::Multi => self.multi(key).is_some_and(|set| !set.is_empty()),
            FilterKind::Price => self.price.is_some(),
            FilterKind::Period => self.period.is_some(),
        }
    }

    /// Keys carrying a value, in query-string order.
    pub fn active_keys(&self) -> Vec<FilterKey> {
        FilterKey::all().filter(|key| self.is_active(*key)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active_keys().is_empty()
    }

    /// Remove any value of `key`.
    pub fn clear(&mut self, key: FilterKey) {
        match key.kind() {
            FilterKind::Single => {
                if let Some(slot) = self.single_mut(key) {
                    *slot = None;
                }
            }
            FilterKind::Multi => {
                if let Some(set) = self.multi_mut(key) {
                    set.clear();
                }
            }
            FilterKind::Price => self.price = None,
            FilterKind::Period => self.period = None,
        }
    }
}
