//! Breadcrumbs and JSON-LD structured data for listing pages
//!
//! Breadcrumbs follow the canonical path dimension by dimension
//! (country → state → category → city, or vehicle type → brand), so every
//! breadcrumb path is a canonical ancestor of the next one.
//!
//! The JSON-LD output is embedded verbatim by the rendering layer and read by
//! crawlers; its field names follow schema.org and must stay stable:
//!
//! ```json
//! {
//!   "@context": "https://schema.org",
//!   "@graph": [
//!     { "@type": "BreadcrumbList", "itemListElement": [ ... ] },
//!     { "@type": "CollectionPage", "name": "...", "description": "...",
//!       "url": "...", "contentLocation": { "@type": "City", ... } }
//!   ]
//! }
//! ```

use serde::Serialize;

use crate::canonical::{build_canonical_path, path_trail, Dimension};
use crate::config::SiteConfig;
use crate::dimensions::DimensionSet;
use crate::error::Result;
use crate::labels::Labels;

/// schema.org context URL.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";

/// One breadcrumb: display name and site-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbEntry {
    pub name: String,
    pub path: String,
}

/// Build the breadcrumb trail for a page.
///
/// Always starts with country, state and category, followed by either the
/// city or the vehicle type and/or brand.
pub fn build_breadcrumbs(dims: &DimensionSet, labels: &Labels) -> Vec<BreadcrumbEntry> {
    path_trail(dims)
        .into_iter()
        .map(|step| {
            let name = match step.dimension {
                Dimension::Country => labels.country.clone(),
                Dimension::State => labels.state.clone(),
                Dimension::Category => labels.category.clone(),
                Dimension::City => label_or_slug(labels.city.as_deref(), step.slug),
                Dimension::VehicleType => label_or_slug(labels.vehicle_type.as_deref(), step.slug),
                Dimension::Brand => label_or_slug(labels.brand.as_deref(), step.slug),
            };
            BreadcrumbEntry {
                name,
                path: step.path,
            }
        })
        .collect()
}

fn label_or_slug(label: Option<&str>, slug: &str) -> String {
    label.unwrap_or(slug).to_string()
}

/// Name and description of the collection page, derived from labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub description: String,
}

impl PageSummary {
    pub fn from_labels(labels: &Labels) -> Self {
        let subject = [
            labels.brand.as_deref(),
            labels.vehicle_type.as_deref(),
            Some(labels.category.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        let place = match labels.city.as_deref() {
            Some(city) => format!("{city}, {}", labels.state),
            None => labels.state.clone(),
        };

        Self {
            name: format!("{subject} for Rent in {place}"),
            description: format!(
                "Browse {subject} available for rent in {place}, {}.",
                labels.country
            ),
        }
    }
}

/// Nested geographic place (`City ⊂ State ⊂ Country`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contained_in_place: Option<Box<Place>>,
}

impl Place {
    /// Geographic hierarchy for city pages; `None` for every other page.
    pub fn city_hierarchy(labels: &Labels) -> Option<Self> {
        let city = labels.city.as_ref()?;
        let country = Place {
            kind: "Country",
            name: labels.country.clone(),
            contained_in_place: None,
        };
        let state = Place {
            kind: "State",
            name: labels.state.clone(),
            contained_in_place: Some(Box::new(country)),
        };
        Some(Place {
            kind: "City",
            name: city.clone(),
            contained_in_place: Some(Box::new(state)),
        })
    }
}

/// Everything a listing page needs for structured data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredData {
    pub canonical_path: String,
    pub breadcrumbs: Vec<BreadcrumbEntry>,
    pub page: PageSummary,
    pub location: Option<Place>,
}

impl StructuredData {
    pub fn build(dims: &DimensionSet, labels: &Labels) -> Self {
        Self {
            canonical_path: build_canonical_path(dims),
            breadcrumbs: build_breadcrumbs(dims, labels),
            page: PageSummary::from_labels(labels),
            location: Place::city_hierarchy(labels),
        }
    }

    /// Render the JSON-LD document with absolute URLs for `site`.
    pub fn to_json_ld(&self, site: &SiteConfig) -> Result<serde_json::Value> {
        let breadcrumb_list = BreadcrumbList {
            item_list_element: self
                .breadcrumbs
                .iter()
                .enumerate()
                .map(|(i, entry)| ListItem {
                    kind: "ListItem",
                    position: i + 1,
                    name: &entry.name,
                    item: site.absolute_url(&entry.path),
                })
                .collect(),
        };
        let collection_page = CollectionPage {
            name: &self.page.name,
            description: &self.page.description,
            url: site.absolute_url(&self.canonical_path),
            content_location: self.location.as_ref(),
        };
        let document = JsonLdDocument {
            context: SCHEMA_CONTEXT,
            graph: vec![
                GraphNode::BreadcrumbList(breadcrumb_list),
                GraphNode::CollectionPage(collection_page),
            ],
        };
        Ok(serde_json::to_value(document)?)
    }
}

#[derive(Serialize)]
struct JsonLdDocument<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@graph")]
    graph: Vec<GraphNode<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "@type")]
enum GraphNode<'a> {
    BreadcrumbList(BreadcrumbList<'a>),
    CollectionPage(CollectionPage<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BreadcrumbList<'a> {
    item_list_element: Vec<ListItem<'a>>,
}

#[derive(Serialize)]
struct ListItem<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    position: usize,
    name: &'a str,
    item: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionPage<'a> {
    name: &'a str,
    description: &'a str,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_location: Option<&'a Place>,
}
