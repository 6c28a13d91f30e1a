//! Record types decoded from the two input datasets.

use serde::{Deserialize, Serialize};

/// A geographic point keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Descriptive data for a location. `id` is expected to match a
/// [`Location`] but nothing guarantees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub reviews: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_type_field_maps_to_kind() {
        let meta: Metadata =
            serde_json::from_str(r#"{"id":"A","type":"park","rating":4.5,"reviews":12}"#)
                .unwrap();

        assert_eq!(meta.kind, "park");
        assert_eq!(meta.reviews, 12);
    }

    #[test]
    fn test_integer_coordinates_are_accepted() {
        let loc: Location =
            serde_json::from_str(r#"{"id":"A","latitude":1,"longitude":-2}"#).unwrap();

        assert_eq!(loc.latitude, 1.0);
        assert_eq!(loc.longitude, -2.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<Location, _> =
            serde_json::from_str(r#"{"id":"A","latitude":1.0,"longitude":2.0,"name":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result: Result<Metadata, _> =
            serde_json::from_str(r#"{"id":"A","type":"park","reviews":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_rating_is_rejected() {
        let result: Result<Metadata, _> =
            serde_json::from_str(r#"{"id":"A","type":"park","rating":"high","reviews":3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_or_fractional_reviews_are_rejected() {
        let negative: Result<Metadata, _> =
            serde_json::from_str(r#"{"id":"A","type":"park","rating":1.0,"reviews":-1}"#);
        let fractional: Result<Metadata, _> =
            serde_json::from_str(r#"{"id":"A","type":"park","rating":1.0,"reviews":2.5}"#);

        assert!(negative.is_err());
        assert!(fractional.is_err());
    }
}
