//! Generated SEO content for pages without remote metadata
//!
//! [`generate_fallback`] is total: every page type produces a complete
//! [`MetadataRecord`] from its labels alone. Titles and descriptions are
//! truncated for meta-tag previews after interpolation.

use serde::Serialize;
use strum::{AsRefStr, Display};

use crate::config::{DESCRIPTION_MAX_LEN, ELLIPSIS, TITLE_MAX_LEN};
use crate::dimensions::DimensionSet;
use crate::labels::Labels;
use crate::metadata::MetadataRecord;

/// Page shape, selecting the fallback template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MetadataType {
    City,
    VehicleTypeBrand,
    Brand,
    VehicleType,
    Category,
}

impl MetadataType {
    pub fn for_dimensions(dims: &DimensionSet) -> Self {
        if dims.city().is_some() {
            return Self::City;
        }
        match (dims.vehicle_type(), dims.brand()) {
            (Some(_), Some(_)) => Self::VehicleTypeBrand,
            (None, Some(_)) => Self::Brand,
            (Some(_), None) => Self::VehicleType,
            (None, None) => Self::Category,
        }
    }
}

/// Text of a generated record before truncation.
struct Template {
    title: String,
    description: String,
    h1: String,
    h2: String,
}

/// Generate SEO content for a page from its labels.
///
/// A label missing for the requested type (e.g. no city on a `City` page)
/// falls back to the next broader label, so the result is never empty.
pub fn generate_fallback(labels: &Labels, metadata_type: MetadataType) -> MetadataRecord {
    let template = match metadata_type {
        MetadataType::City => city_template(labels),
        MetadataType::VehicleTypeBrand => vehicle_type_brand_template(labels),
        MetadataType::Brand => brand_template(labels),
        MetadataType::VehicleType => vehicle_type_template(labels),
        MetadataType::Category => category_template(labels),
    };

    MetadataRecord {
        meta_title: Some(truncate(&template.title, TITLE_MAX_LEN)),
        meta_description: Some(truncate(&template.description, DESCRIPTION_MAX_LEN)),
        h1: Some(template.h1),
        h2: Some(template.h2),
    }
}

/// Shorten `text` to `max` characters, ending in [`ELLIPSIS`], if it is longer.
///
/// Counts Unicode scalar values, not bytes.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.chars().count());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn city_template(l: &Labels) -> Template {
    let place = l.city.as_deref().unwrap_or(&l.state);
    Template {
        title: format!("Rent a {} in {}, {}", l.category_singular, place, l.state),
        description: format!(
            "Find the best {} for rent in {}, {}, {}. Compare daily, weekly and monthly prices and book with free delivery.",
            l.category.to_lowercase(),
            place,
            l.state,
            l.country
        ),
        h1: format!("{} Rental in {}", l.category_singular, place),
        h2: format!("{} available near {}, {}", l.category, place, l.state),
    }
}

fn vehicle_type_brand_template(l: &Labels) -> Template {
    let vehicle_type = l.vehicle_type.as_deref().unwrap_or(&l.category_singular);
    let brand = l.brand.as_deref().unwrap_or_default();
    Template {
        title: format!("Rent {brand} {vehicle_type} in {}", l.state),
        description: format!(
            "Rent a {brand} {vehicle_type} in {}, {}. Compare the latest models, prices and rental periods from trusted suppliers.",
            l.state, l.country
        ),
        h1: format!("{brand} {vehicle_type} Rental in {}", l.state),
        h2: format!("Browse {brand} {vehicle_type} {} for rent", l.category),
    }
}

fn brand_template(l: &Labels) -> Template {
    let brand = l.brand.as_deref().unwrap_or_default();
    Template {
        title: format!("Rent {brand} {} in {}, {}", l.category, l.state, l.country),
        description: format!(
            "Choose from a wide range of {brand} {} for rent in {}. Flexible daily, weekly and monthly plans with no hidden charges.",
            l.category.to_lowercase(),
            l.state
        ),
        h1: format!("{brand} {} Rental in {}", l.category_singular, l.state),
        h2: format!("Popular {brand} models in {}", l.state),
    }
}

fn vehicle_type_template(l: &Labels) -> Template {
    let vehicle_type = l.vehicle_type.as_deref().unwrap_or(&l.category_singular);
    Template {
        title: format!("Rent {vehicle_type} {} in {}", l.category, l.state),
        description: format!(
            "Book a {vehicle_type} in {}, {}. Compare prices across suppliers and pick the {} that fits your trip.",
            l.state,
            l.country,
            l.category_singular.to_lowercase()
        ),
        h1: format!("{vehicle_type} Rental in {}", l.state),
        h2: format!("{vehicle_type} {} for rent in {}", l.category, l.state),
    }
}

fn category_template(l: &Labels) -> Template {
    let state = &l.state;
    let country = &l.country;
    match l.category_key.as_str() {
        "cars" => Template {
            title: format!("Rent a Car in {state}, {country} | Daily & Monthly"),
            description: format!(
                "Car rental in {state} from trusted local companies. Compare economy, luxury and SUV cars with daily, weekly and monthly rates."
            ),
            h1: format!("Car Rental in {state}"),
            h2: format!("Cheap and luxury cars for rent in {state}"),
        },
        "bikes" => Template {
            title: format!("Bike Rental in {state} | Motorcycles & Scooters"),
            description: format!(
                "Rent motorcycles and scooters in {state}, {country}. Flexible hourly, daily and monthly bike rental plans."
            ),
            h1: format!("Bike Rental in {state}"),
            h2: format!("Motorcycles and scooters for rent in {state}"),
        },
        "yachts" => Template {
            title: format!("Yacht Rental in {state} | Private Charters"),
            description: format!(
                "Charter a private yacht in {state}, {country}. Hourly and full-day yacht rentals with crew for parties and tours."
            ),
            h1: format!("Yacht Rental in {state}"),
            h2: format!("Private yachts for hire in {state}"),
        },
        "buses" => Template {
            title: format!("Bus Rental in {state} | Buses with Driver"),
            description: format!(
                "Hire buses and coaches with driver in {state}, {country} for events, school trips and staff transport."
            ),
            h1: format!("Bus Rental in {state}"),
            h2: format!("Buses and coaches for hire in {state}"),
        },
        _ => Template {
            title: format!("{} Rental in {state}, {country}", l.category_singular),
            description: format!(
                "Rent {} in {state}, {country}. Compare prices from local suppliers and book online in minutes.",
                l.category.to_lowercase()
            ),
            h1: format!("{} Rental in {state}", l.category_singular),
            h2: format!("{} for rent in {state}", l.category),
        },
    }
}
