//! Facet filters
//!
//! - [`selection`]: filter keys, values and the in-memory selection
//! - [`query`]: query-string codec
//! - [`sync`]: selection ⇄ URL synchronizer
//! - [`brand_search`]: debounced remote brand search
//! - [`accordion`]: sidebar accordion model

pub mod accordion;
pub mod brand_search;
pub mod query;
pub mod selection;
pub mod sync;

pub use accordion::{AccordionItem, AccordionSection, FilterAccordion};
pub use brand_search::{fetch_brands, BrandSearch};
pub use query::{decode_selection, encode_selection, merge_selection, QueryParams, PAGE_KEY};
pub use selection::{
    FilterKey, FilterKind, FilterOption, FilterSelection, FilterValue, Period, PriceRange,
};
pub use sync::{FilterSynchronizer, SyncState};
