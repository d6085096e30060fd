//! Priority-ordered SEO metadata resolution
//!
//! Metadata for a listing page is looked up remotely in a fixed order of
//! specificity. The [`PriorityPlan`] for a dimension set lists the lookups;
//! [`MetadataResolver`] runs them one after another and stops at the first
//! non-empty [`MetadataRecord`].
//!
//! | Dimensions            | Lookups, in order                                         |
//! |-----------------------|-----------------------------------------------------------|
//! | city                  | none (city pages use generated content)                   |
//! | vehicle type + brand  | `{state, category, type}`, then `{category, brand}`       |
//! | brand                 | `{category, brand}`                                       |
//! | vehicle type          | `{state, category, type}`                                 |
//! | category only         | `{state, category}`                                       |
//!
//! Brand metadata is global: brand lookups never carry the state. A brand-only
//! page never falls back to a vehicle-type lookup.
//!
//! Remote absence is not an error. A failed request, non-success status,
//! malformed body or missing `result` makes that tier empty and resolution
//! moves on.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use tracing::{debug, warn};

use crate::client::{decode_result, ApiClient};
use crate::dimensions::DimensionSet;

/// Path of the listing metadata endpoint.
pub const METADATA_ENDPOINT: &str = "/metadata/listing";

/// SEO metadata for a listing page. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2: Option<String>,
}

impl MetadataRecord {
    /// A record is empty if every field is absent or blank.
    pub fn is_empty(&self) -> bool {
        [&self.meta_title, &self.meta_description, &self.h1, &self.h2]
            .iter()
            .all(|field| field.as_deref().is_none_or(|v| v.trim().is_empty()))
    }

    /// Fill every absent or blank field from `fallback`.
    pub fn or_fallback(self, fallback: MetadataRecord) -> MetadataRecord {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            primary.filter(|v| !v.trim().is_empty()).or(fallback)
        }
        MetadataRecord {
            meta_title: pick(self.meta_title, fallback.meta_title),
            meta_description: pick(self.meta_description, fallback.meta_description),
            h1: pick(self.h1, fallback.h1),
            h2: pick(self.h2, fallback.h2),
        }
    }
}

/// Which lookup produced a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LookupTier {
    VehicleType,
    Brand,
    Category,
}

/// One remote metadata lookup: a reduced subset of the dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    pub tier: LookupTier,
    pub category: String,
    pub state: Option<String>,
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
}

impl LookupKey {
    fn vehicle_type(dims: &DimensionSet, vehicle_type: &str) -> Self {
        Self {
            tier: LookupTier::VehicleType,
            category: dims.category().to_string(),
            state: Some(dims.state().to_string()),
            vehicle_type: Some(vehicle_type.to_string()),
            brand: None,
        }
    }

    fn brand(dims: &DimensionSet, brand: &str) -> Self {
        Self {
            tier: LookupTier::Brand,
            category: dims.category().to_string(),
            state: None,
            vehicle_type: None,
            brand: Some(brand.to_string()),
        }
    }

    fn category(dims: &DimensionSet) -> Self {
        Self {
            tier: LookupTier::Category,
            category: dims.category().to_string(),
            state: Some(dims.state().to_string()),
            vehicle_type: None,
            brand: None,
        }
    }

    /// Request path for this lookup, e.g.
    /// `/metadata/listing?category=cars&state=dubai&type=suv`.
    pub fn request_path(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.append_pair("category", &self.category);
        if let Some(state) = &self.state {
            query.append_pair("state", state);
        }
        if let Some(vehicle_type) = &self.vehicle_type {
            query.append_pair("type", vehicle_type);
        }
        if let Some(brand) = &self.brand {
            query.append_pair("brand", brand);
        }
        format!("{METADATA_ENDPOINT}?{}", query.finish())
    }
}

/// Ordered lookups for one dimension set, most specific first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityPlan {
    keys: Vec<LookupKey>,
}

impl PriorityPlan {
    pub fn for_dimensions(dims: &DimensionSet) -> Self {
        let keys = if dims.city().is_some() {
            Vec::new()
        } else {
            match (dims.vehicle_type(), dims.brand()) {
                (Some(vt), Some(brand)) => vec![
                    LookupKey::vehicle_type(dims, vt),
                    LookupKey::brand(dims, brand),
                ],
                (None, Some(brand)) => vec![LookupKey::brand(dims, brand)],
                (Some(vt), None) => vec![LookupKey::vehicle_type(dims, vt)],
                (None, None) => vec![LookupKey::category(dims)],
            }
        };
        Self { keys }
    }

    pub fn keys(&self) -> &[LookupKey] {
        &self.keys
    }

    /// True when the page gets no remote lookup at all (city pages).
    pub fn is_local_only(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A non-empty record and the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub record: MetadataRecord,
    pub tier: LookupTier,
}

/// Runs a [`PriorityPlan`] against the marketplace API.
pub struct MetadataResolver<C> {
    client: C,
}

impl<C: ApiClient> MetadataResolver<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Resolve metadata for `dims`, or `None` if every tier came back empty.
    ///
    /// Tiers are awaited strictly in order; tier N+1 is only requested once
    /// tier N resolved empty.
    pub async fn resolve(&self, dims: &DimensionSet) -> Option<ResolvedMetadata> {
        let plan = PriorityPlan::for_dimensions(dims);
        if plan.is_local_only() {
            debug!(dims = %dims, "City page, skipping remote metadata");
            return None;
        }

        for key in plan.keys() {
            if let Some(record) = self.fetch(dims.country(), key).await {
                debug!(dims = %dims, tier = %key.tier, "Resolved listing metadata");
                return Some(ResolvedMetadata {
                    record,
                    tier: key.tier,
                });
            }
            debug!(dims = %dims, tier = %key.tier, "No metadata at tier, falling through");
        }
        None
    }

    /// Single remote lookup; every failure mode collapses to `None`.
    async fn fetch(&self, country: &str, key: &LookupKey) -> Option<MetadataRecord> {
        let path = key.request_path();
        let body = match self.client.get_json(&path, country).await {
            Ok(body) => body,
            Err(e) => {
                warn!(path = %path, error = %e, "Metadata lookup failed");
                return None;
            }
        };

        match decode_result::<MetadataRecord>(body) {
            Ok(Some(record)) if !record.is_empty() => Some(record),
            Ok(_) => None,
            Err(e) => {
                warn!(path = %path, error = %e, "Malformed metadata response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockApiClient;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dims(path: &str) -> DimensionSet {
        DimensionSet::from_path(path).unwrap()
    }

    fn record(title: &str) -> MetadataRecord {
        MetadataRecord {
            meta_title: Some(title.to_string()),
            ..MetadataRecord::default()
        }
    }

    const VT_PATH: &str = "/metadata/listing?category=cars&state=dubai&type=suv";
    const BRAND_PATH: &str = "/metadata/listing?category=cars&brand=bmw";
    const CATEGORY_PATH: &str = "/metadata/listing?category=cars&state=dubai";

    #[test]
    fn test_record_is_empty() {
        assert!(MetadataRecord::default().is_empty());
        assert!(MetadataRecord {
            h1: Some("   ".to_string()),
            ..MetadataRecord::default()
        }
        .is_empty());
        assert!(!record("Title").is_empty());
    }

    #[test]
    fn test_or_fallback_fills_missing_fields() {
        let remote = MetadataRecord {
            meta_title: Some("Remote".to_string()),
            h1: Some("".to_string()),
            ..MetadataRecord::default()
        };
        let fallback = MetadataRecord {
            meta_title: Some("Fallback".to_string()),
            meta_description: Some("Desc".to_string()),
            h1: Some("H1".to_string()),
            h2: Some("H2".to_string()),
        };
        let merged = remote.or_fallback(fallback);
        assert_eq!(merged.meta_title.as_deref(), Some("Remote"));
        assert_eq!(merged.meta_description.as_deref(), Some("Desc"));
        assert_eq!(merged.h1.as_deref(), Some("H1"));
    }

    #[test]
    fn test_plan_orders() {
        let plan = PriorityPlan::for_dimensions(&dims("/ae/dubai/listing/cars/suv/brand/bmw"));
        let paths: Vec<String> = plan.keys().iter().map(LookupKey::request_path).collect();
        assert_eq!(paths, vec![VT_PATH.to_string(), BRAND_PATH.to_string()]);

        let plan = PriorityPlan::for_dimensions(&dims("/ae/dubai/listing/cars/brand/bmw"));
        assert_eq!(plan.keys().len(), 1);
        assert_eq!(plan.keys()[0].tier, LookupTier::Brand);
        assert_eq!(plan.keys()[0].state, None);

        let plan = PriorityPlan::for_dimensions(&dims("/ae/dubai/listing/cars/suv"));
        assert_eq!(plan.keys()[0].request_path(), VT_PATH);

        let plan = PriorityPlan::for_dimensions(&dims("/ae/dubai/listing/cars"));
        assert_eq!(plan.keys()[0].request_path(), CATEGORY_PATH);

        let plan = PriorityPlan::for_dimensions(&dims("/ae/dubai/listing/cars/city/marina"));
        assert!(plan.is_local_only());
    }

    #[tokio::test]
    async fn test_vehicle_type_brand_falls_back_to_brand() {
        let client = MockApiClient::new()
            .with_response(VT_PATH, json!({}))
            .with_response(BRAND_PATH, json!({"result": {"metaTitle": "BMW rentals"}}));
        let resolver = MetadataResolver::new(client);

        let resolved = resolver
            .resolve(&dims("/ae/dubai/listing/cars/suv/brand/bmw"))
            .await
            .unwrap();
        assert_eq!(resolved.tier, LookupTier::Brand);
        assert_eq!(resolved.record, record("BMW rentals"));
        assert_eq!(resolver.client().requests(), vec![VT_PATH, BRAND_PATH]);
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let client = MockApiClient::new()
            .with_response(VT_PATH, json!({"result": {"h1": "SUVs in Dubai"}}))
            .with_response(BRAND_PATH, json!({"result": {"metaTitle": "BMW rentals"}}));
        let resolver = MetadataResolver::new(client);

        let resolved = resolver
            .resolve(&dims("/ae/dubai/listing/cars/suv/brand/bmw"))
            .await
            .unwrap();
        assert_eq!(resolved.tier, LookupTier::VehicleType);
        assert_eq!(resolver.client().requests(), vec![VT_PATH]);
    }

    #[tokio::test]
    async fn test_brand_only_never_tries_vehicle_type() {
        let client = MockApiClient::new().with_response(VT_PATH, json!({"result": {"h1": "x"}}));
        let resolver = MetadataResolver::new(client);

        let resolved = resolver.resolve(&dims("/ae/dubai/listing/cars/brand/bmw")).await;
        assert_eq!(resolved, None);
        assert_eq!(resolver.client().requests(), vec![BRAND_PATH]);
    }

    #[tokio::test]
    async fn test_city_makes_no_request() {
        let resolver = MetadataResolver::new(MockApiClient::new());
        let resolved = resolver
            .resolve(&dims("/ae/dubai/listing/cars/city/downtown-dubai"))
            .await;
        assert_eq!(resolved, None);
        assert!(resolver.client().requests().is_empty());
    }

    #[tokio::test]
    async fn test_failures_and_empty_records_resolve_empty() {
        // 404 from the mock for the vehicle-type tier, blank record for brand
        let client = MockApiClient::new()
            .with_response(BRAND_PATH, json!({"result": {"metaTitle": " "}}));
        let resolver = MetadataResolver::new(client);
        let resolved = resolver
            .resolve(&dims("/ae/dubai/listing/cars/suv/brand/bmw"))
            .await;
        assert_eq!(resolved, None);
    }

    #[tokio::test]
    async fn test_malformed_body_resolves_empty() {
        let client =
            MockApiClient::new().with_response(CATEGORY_PATH, json!({"result": "not an object"}));
        let resolver = MetadataResolver::new(client);
        assert_eq!(resolver.resolve(&dims("/ae/dubai/listing/cars")).await, None);
    }
}
