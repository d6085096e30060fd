//! Listing page resolution
//!
//! Ties the engine together for one page request:
//!
//! 1. parse and validate the dimension set (invalid combinations are errors)
//! 2. compare the requested path with the canonical path, redirecting on mismatch
//! 3. resolve remote metadata through the priority chain
//! 4. fill whatever is missing with generated fallback content
//! 5. build breadcrumbs and structured data
//!
//! End users always get complete SEO content: either remote, generated, or a
//! field-by-field mix of the two.

use serde::Serialize;
use tracing::{debug, info};

use crate::canonical::{build_canonical_path, check_request, PathDecision};
use crate::client::ApiClient;
use crate::config::SiteConfig;
use crate::dimensions::DimensionSet;
use crate::error::Result;
use crate::fallback::{generate_fallback, MetadataType};
use crate::labels::Labels;
use crate::metadata::{LookupTier, MetadataRecord, MetadataResolver};
use crate::navigation::NavigationSession;
use crate::structured_data::{BreadcrumbEntry, StructuredData};

/// Where the page's SEO content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "tier", rename_all = "camelCase")]
pub enum MetadataOrigin {
    /// Remote record from the given tier (missing fields filled locally)
    Remote(LookupTier),
    /// Entirely generated
    Fallback,
}

/// Resolved SEO output for one listing page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSeo {
    pub dimensions: DimensionSet,
    pub canonical_path: String,
    pub metadata_type: MetadataType,
    pub metadata: MetadataRecord,
    pub origin: MetadataOrigin,
    pub breadcrumbs: Vec<BreadcrumbEntry>,
    pub structured_data: serde_json::Value,
}

/// Outcome of a page request.
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Render(Box<PageSeo>),
    Redirect { location: String, status: u16 },
}

/// Resolves listing pages against the marketplace API.
pub struct ListingPageResolver<C> {
    resolver: MetadataResolver<C>,
    site: SiteConfig,
}

impl<C: ApiClient> ListingPageResolver<C> {
    pub fn new(client: C, site: SiteConfig) -> Self {
        Self {
            resolver: MetadataResolver::new(client),
            site,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Handle a requested path (optionally with query string).
    ///
    /// Non-canonical spellings of a valid listing (trailing slash, upper
    /// case, missing category) redirect to the canonical path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a listing path or carries an
    /// invalid dimension combination.
    pub async fn handle_request(&self, requested: &str) -> Result<PageOutcome> {
        let dims = DimensionSet::from_path(requested)?;
        match check_request(requested, &dims) {
            PathDecision::Redirect { location, status } => {
                info!(requested = %requested, location = %location, "Redirecting to canonical path");
                Ok(PageOutcome::Redirect { location, status })
            }
            PathDecision::Render => Ok(PageOutcome::Render(Box::new(self.resolve(&dims).await?))),
        }
    }

    /// Resolve SEO content for a validated dimension set.
    pub async fn resolve(&self, dims: &DimensionSet) -> Result<PageSeo> {
        let labels = Labels::from_dimensions(dims);
        let metadata_type = MetadataType::for_dimensions(dims);
        let fallback = generate_fallback(&labels, metadata_type);

        let (metadata, origin) = match self.resolver.resolve(dims).await {
            Some(resolved) => (
                resolved.record.or_fallback(fallback),
                MetadataOrigin::Remote(resolved.tier),
            ),
            None => (fallback, MetadataOrigin::Fallback),
        };
        debug!(dims = %dims, origin = ?origin, "Resolved page metadata");

        let structured = StructuredData::build(dims, &labels);
        let structured_data = structured.to_json_ld(&self.site)?;

        Ok(PageSeo {
            dimensions: dims.clone(),
            canonical_path: build_canonical_path(dims),
            metadata_type,
            metadata,
            origin,
            breadcrumbs: structured.breadcrumbs,
            structured_data,
        })
    }

    /// Resolve `dims` as the new navigation target of `session`.
    ///
    /// Returns `Ok(None)` if the session moved on to another listing before
    /// resolution finished.
    pub async fn resolve_navigation(
        &self,
        session: &NavigationSession,
        dims: DimensionSet,
    ) -> Result<Option<PageSeo>> {
        let ticket = session.navigate(dims);
        let seo = self.resolve(ticket.dimensions()).await?;
        Ok(session.accept(&ticket, seo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::MockApiClient;
    use crate::error::NavigationError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page_resolver(client: MockApiClient) -> ListingPageResolver<MockApiClient> {
        ListingPageResolver::new(client, SiteConfig::new("http://api"))
    }

    #[tokio::test]
    async fn test_city_page_uses_fallback() {
        let resolver = page_resolver(MockApiClient::new());
        let dims = DimensionSet::from_path("/ae/dubai/listing/cars/city/downtown-dubai").unwrap();

        let seo = resolver.resolve(&dims).await.unwrap();
        assert_eq!(seo.origin, MetadataOrigin::Fallback);
        assert_eq!(seo.metadata_type, MetadataType::City);
        assert!(seo.metadata.meta_title.unwrap().contains("Downtown Dubai"));
        assert!(seo.structured_data["@graph"][1]["contentLocation"].is_object());
    }

    #[tokio::test]
    async fn test_remote_record_is_completed_from_fallback() {
        let client = MockApiClient::new().with_response(
            "/metadata/listing?category=cars&brand=bmw",
            json!({"result": {"metaTitle": "BMW Rental Dubai"}}),
        );
        let resolver = page_resolver(client);
        let dims = DimensionSet::from_path("/ae/dubai/listing/cars/brand/bmw").unwrap();

        let seo = resolver.resolve(&dims).await.unwrap();
        assert_eq!(seo.origin, MetadataOrigin::Remote(LookupTier::Brand));
        assert_eq!(seo.metadata.meta_title.as_deref(), Some("BMW Rental Dubai"));
        assert!(seo.metadata.meta_description.is_some());
        assert!(seo.metadata.h1.is_some());
        assert_eq!(seo.canonical_path, "/ae/dubai/listing/cars/brand/bmw");
        assert_eq!(seo.breadcrumbs.len(), 4);
    }

    #[tokio::test]
    async fn test_handle_request_redirects_non_canonical() {
        let resolver = page_resolver(MockApiClient::new());
        match resolver.handle_request("/AE/Dubai/listing/").await.unwrap() {
            PageOutcome::Redirect { location, status } => {
                assert_eq!(location, "/ae/dubai/listing/cars");
                assert_eq!(status, 308);
            }
            PageOutcome::Render(_) => panic!("expected redirect"),
        }
        assert!(resolver.resolver.client().requests().is_empty());
    }

    #[tokio::test]
    async fn test_handle_request_rejects_unrecognized_path() {
        let resolver = page_resolver(MockApiClient::new());
        let result = resolver
            .handle_request("/ae/dubai/listing/cars/city/marina/brand/bmw")
            .await;
        assert!(matches!(result, Err(NavigationError::InvalidPath(_))));
        assert!(resolver.resolver.client().requests().is_empty());
    }

    #[tokio::test]
    async fn test_handle_request_renders_canonical() {
        let resolver = page_resolver(MockApiClient::new());
        let outcome = resolver
            .handle_request("/ae/dubai/listing/cars?price=100-500")
            .await
            .unwrap();
        assert!(matches!(outcome, PageOutcome::Render(seo) if seo.origin == MetadataOrigin::Fallback));
    }

    #[tokio::test]
    async fn test_resolve_navigation_discards_superseded() {
        let resolver = page_resolver(MockApiClient::new());
        let session = NavigationSession::new();
        let cars = DimensionSet::from_path("/ae/dubai/listing/cars").unwrap();
        let bikes = DimensionSet::from_path("/ae/dubai/listing/bikes").unwrap();

        let current = resolver
            .resolve_navigation(&session, cars.clone())
            .await
            .unwrap();
        assert!(current.is_some());

        // The user navigates elsewhere while the "cars" lookup is in flight.
        let ticket = session.navigate(cars);
        let in_flight = resolver.resolve(ticket.dimensions()).await.unwrap();
        session.navigate(bikes);
        assert!(session.accept(&ticket, in_flight).is_none());
    }

    #[test]
    fn test_origin_serialization() {
        assert_eq!(
            serde_json::to_value(MetadataOrigin::Remote(LookupTier::VehicleType)).unwrap(),
            json!({"kind": "remote", "tier": "vehicleType"})
        );
        assert_eq!(
            serde_json::to_value(MetadataOrigin::Fallback).unwrap(),
            json!({"kind": "fallback"})
        );
    }
}
