//! Error types for the Rentline navigation engine

use thiserror::Error;

/// Main error type for navigation engine operations
#[derive(Error, Debug)]
pub enum NavigationError {
    /// `city` combined with `vehicleType` and/or `brand`.
    ///
    /// This is a routing misconfiguration upstream, never a runtime degradation.
    #[error(
        "Invalid dimension combination: city '{city}' cannot be combined with {}",
        describe_conflict(.vehicle_type.as_deref(), .brand.as_deref())
    )]
    InvalidCombination {
        city: String,
        vehicle_type: Option<String>,
        brand: Option<String>,
    },

    /// A dimension value is not a valid URL slug
    #[error("Invalid {dimension} slug: '{value}'")]
    InvalidSlug {
        dimension: &'static str,
        value: String,
    },

    /// A required dimension is missing
    #[error("Missing required dimension: {0}")]
    MissingDimension(&'static str),

    /// A listing path could not be parsed
    #[error("Invalid listing path: {0}")]
    InvalidPath(String),

    /// A filter query string could not be interpreted
    #[error("Invalid filter query: {0}")]
    InvalidQuery(String),

    /// A filter was given a value of the wrong shape
    #[error("Invalid value for filter '{key}': {reason}")]
    InvalidFilterValue { key: String, reason: String },

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_conflict(vehicle_type: Option<&str>, brand: Option<&str>) -> String {
    match (vehicle_type, brand) {
        (Some(vt), Some(b)) => format!("vehicle type '{vt}' and brand '{b}'"),
        (Some(vt), None) => format!("vehicle type '{vt}'"),
        (None, Some(b)) => format!("brand '{b}'"),
        (None, None) => "nothing".to_string(),
    }
}

/// Result type alias for navigation engine operations
pub type Result<T> = std::result::Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_combination_display() {
        let err = NavigationError::InvalidCombination {
            city: "downtown-dubai".to_string(),
            vehicle_type: Some("suv".to_string()),
            brand: Some("bmw".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimension combination: city 'downtown-dubai' cannot be combined with vehicle type 'suv' and brand 'bmw'"
        );
    }

    #[test]
    fn test_invalid_combination_brand_only_display() {
        let err = NavigationError::InvalidCombination {
            city: "marina".to_string(),
            vehicle_type: None,
            brand: Some("audi".to_string()),
        };
        assert!(err.to_string().ends_with("with brand 'audi'"));
    }

    #[test]
    fn test_api_error_display() {
        let err = NavigationError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 503): unavailable");
    }
}
