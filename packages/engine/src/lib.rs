//! Rentline Navigation Engine
//!
//! Resolves a rental listing page from its URL dimensions
//! (country / state / category / vehicle type / brand / city).
//! This library provides functionality for:
//! - Validating dimension combinations and building canonical paths
//! - Priority-ordered remote SEO metadata lookup with generated fallbacks
//! - Breadcrumbs and JSON-LD structured data
//! - Keeping facet filter selections in sync with the URL query string
//!
//! # Example
//!
//! ```ignore
//! use rentline_engine::{HttpApiClient, ListingPageResolver, PageOutcome, SiteConfig};
//!
//! let config = SiteConfig::from_env()?;
//! let resolver = ListingPageResolver::new(HttpApiClient::new(&config)?, config);
//!
//! match resolver.handle_request("/ae/dubai/listing/cars/brand/bmw").await? {
//!     PageOutcome::Render(seo) => println!("{:?}", seo.metadata.meta_title),
//!     PageOutcome::Redirect { location, status } => println!("{status} -> {location}"),
//! }
//! ```

pub mod cache;
pub mod canonical;
pub mod client;
pub mod config;
pub mod debounce;
pub mod dimensions;
pub mod error;
pub mod fallback;
pub mod filters;
pub mod labels;
pub mod metadata;
pub mod navigation;
pub mod page;
pub mod structured_data;

// Re-export commonly used items
pub use cache::VehicleTypeCache;
pub use canonical::{build_canonical_path, check_request, PathDecision};
pub use client::{ApiClient, HttpApiClient};
pub use config::SiteConfig;
pub use dimensions::{is_valid_combination, DimensionSet, DimensionSetBuilder};
pub use error::{NavigationError, Result};
pub use fallback::{generate_fallback, MetadataType};
pub use filters::{
    BrandSearch, FilterAccordion, FilterKey, FilterOption, FilterSelection, FilterSynchronizer,
    FilterValue, Period, PriceRange, SyncState,
};
pub use labels::Labels;
pub use metadata::{LookupTier, MetadataRecord, MetadataResolver, PriorityPlan, ResolvedMetadata};
pub use navigation::{NavigationSession, ResolutionTicket};
pub use page::{ListingPageResolver, MetadataOrigin, PageOutcome, PageSeo};
pub use structured_data::{build_breadcrumbs, BreadcrumbEntry, StructuredData};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
