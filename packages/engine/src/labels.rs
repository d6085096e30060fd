//! Label formatting for URL tokens
//!
//! Converts hyphenated URL slugs into display labels and back:
//!
//! ```
//! use rentline_engine::labels::{singularize, title_case, to_slug};
//!
//! assert_eq!(title_case("downtown-dubai"), "Downtown Dubai");
//! assert_eq!(singularize("sports-cars"), "sports-car");
//! assert_eq!(to_slug("Downtown Dubai"), "downtown-dubai");
//! ```

use crate::dimensions::DimensionSet;

/// Display names for the country codes the marketplace operates in.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("ae", "UAE"),
    ("bh", "Bahrain"),
    ("in", "India"),
    ("kw", "Kuwait"),
    ("om", "Oman"),
    ("qa", "Qatar"),
    ("sa", "Saudi Arabia"),
];

/// Convert a hyphenated slug to a title-cased label.
///
/// Each hyphen-separated word gets an upper-case first letter; the rest of
/// the word is lower-cased. Empty words (from repeated hyphens) are dropped.
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Singularize the last word of a slug (`"sports-cars"` → `"sports-car"`).
pub fn singularize(slug: &str) -> String {
    match slug.rsplit_once('-') {
        Some((head, last)) => format!("{head}-{}", singularize_word(last)),
        None => singularize_word(slug),
    }
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if ["sses", "uses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if lower.len() > 1 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us")
    {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Singular, title-cased label for a slug (`"cars"` → `"Car"`).
pub fn singular_title(slug: &str) -> String {
    title_case(&singularize(slug))
}

/// Convert a display label back to a slug (`"Downtown Dubai"` → `"downtown-dubai"`).
pub fn to_slug(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Display name for a country code; unknown codes are upper-cased.
pub fn country_name(code: &str) -> String {
    let code = code.to_ascii_lowercase();
    COUNTRY_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| code.to_ascii_uppercase())
}

/// Formatted display labels for every dimension of a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub country: String,
    pub state: String,
    /// Category slug, used to pick category-specific templates
    pub category_key: String,
    /// Plural category label, e.g. "Cars"
    pub category: String,
    /// Singular category label, e.g. "Car"
    pub category_singular: String,
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub city: Option<String>,
}

impl Labels {
    pub fn from_dimensions(dims: &DimensionSet) -> Self {
        Self {
            country: country_name(dims.country()),
            state: title_case(dims.state()),
            category_key: dims.category().to_string(),
            category: title_case(dims.category()),
            category_singular: singular_title(dims.category()),
            vehicle_type: dims.vehicle_type().map(title_case),
            brand: dims.brand().map(title_case),
            city: dims.city().map(title_case),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("dubai"), "Dubai");
        assert_eq!(title_case("downtown-dubai"), "Downtown Dubai");
        assert_eq!(title_case("bmw"), "Bmw");
        assert_eq!(title_case("abu--dhabi-"), "Abu Dhabi");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("cars"), "car");
        assert_eq!(singularize("bikes"), "bike");
        assert_eq!(singularize("buses"), "bus");
        assert_eq!(singularize("yachts"), "yacht");
        assert_eq!(singularize("buggies"), "buggy");
        assert_eq!(singularize("coaches"), "coach");
        assert_eq!(singularize("sports-cars"), "sports-car");
        assert_eq!(singularize("limousine"), "limousine");
        assert_eq!(singularize("bus"), "bus");
        assert_eq!(singularize("class"), "class");
    }

    #[test]
    fn test_singular_title() {
        assert_eq!(singular_title("luxury-cars"), "Luxury Car");
    }

    #[test]
    fn test_to_slug_reverses_title_case() {
        assert_eq!(to_slug("Downtown Dubai"), "downtown-dubai");
        assert_eq!(to_slug("  Ras Al  Khaimah "), "ras-al-khaimah");
        assert_eq!(to_slug(&title_case("jumeirah-lake-towers")), "jumeirah-lake-towers");
    }

    #[test]
    fn test_country_name() {
        assert_eq!(country_name("ae"), "UAE");
        assert_eq!(country_name("AE"), "UAE");
        assert_eq!(country_name("sa"), "Saudi Arabia");
        assert_eq!(country_name("zz"), "ZZ");
    }

    #[test]
    fn test_labels_from_dimensions() {
        let dims = DimensionSet::builder("ae", "dubai")
            .category("sports-cars")
            .vehicle_type("suv")
            .brand("land-rover")
            .build()
            .unwrap();
        let labels = Labels::from_dimensions(&dims);
        assert_eq!(labels.country, "UAE");
        assert_eq!(labels.state, "Dubai");
        assert_eq!(labels.category_key, "sports-cars");
        assert_eq!(labels.category, "Sports Cars");
        assert_eq!(labels.category_singular, "Sports Car");
        assert_eq!(labels.vehicle_type.as_deref(), Some("Suv"));
        assert_eq!(labels.brand.as_deref(), Some("Land Rover"));
        assert_eq!(labels.city, None);
    }
}
