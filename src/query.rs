//! Search request descriptors.
//!
//! A [`Query`] is immutable once submitted. The four kinds mirror the request
//! types a map search surface offers: free-text geocoding, reverse geocoding
//! from a coordinate (e.g. after a marker drag), free-text discovery around an
//! area, and category search around a center.

use thiserror::Error;

use crate::geo::{GeoCoordinate, SearchArea};

/// Rejections raised at submission time, before any provider dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("query text is empty")]
    EmptyInput,
}

/// One search request. Built once, never mutated after submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Resolve free text to coordinates, optionally scoped to an area.
    Geocode {
        text: String,
        area: Option<SearchArea>,
    },
    /// Resolve a coordinate to an address.
    ReverseGeocode { coordinate: GeoCoordinate },
    /// Free-text discovery of places around an area.
    Discover { text: String, area: SearchArea },
    /// Category-driven search around a center (e.g. "restaurant").
    Around { category: String, area: SearchArea },
}

impl Query {
    pub fn geocode(text: impl Into<String>) -> Self {
        Self::Geocode {
            text: text.into(),
            area: None,
        }
    }

    pub fn geocode_in(text: impl Into<String>, area: SearchArea) -> Self {
        Self::Geocode {
            text: text.into(),
            area: Some(area),
        }
    }

    /// The free-text component, where the kind has one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Geocode { text, .. } | Self::Discover { text, .. } => Some(text),
            Self::Around { category, .. } => Some(category),
            Self::ReverseGeocode { .. } => None,
        }
    }

    /// Check the query is submittable. Text-bearing kinds must carry
    /// non-whitespace text; reverse lookups are always valid.
    pub fn validate(&self) -> Result<(), QueryError> {
        match self.text() {
            Some(text) if text.trim().is_empty() => Err(QueryError::EmptyInput),
            _ => Ok(()),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Geocode { .. } => "geocode",
            Self::ReverseGeocode { .. } => "reverse-geocode",
            Self::Discover { .. } => "discover",
            Self::Around { .. } => "around",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_rejected() {
        assert_eq!(Query::geocode("").validate(), Err(QueryError::EmptyInput));
        assert_eq!(Query::geocode("  ").validate(), Err(QueryError::EmptyInput));
    }

    #[test]
    fn test_nonempty_text_accepted() {
        assert!(Query::geocode("Berlin").validate().is_ok());
    }

    #[test]
    fn test_reverse_geocode_always_valid() {
        let query = Query::ReverseGeocode {
            coordinate: GeoCoordinate::new(52.52, 13.405).unwrap(),
        };
        assert!(query.validate().is_ok());
        assert!(query.text().is_none());
    }

    #[test]
    fn test_around_validates_category() {
        let area = SearchArea::new(GeoCoordinate::new(52.52, 13.405).unwrap(), 5000);
        let query = Query::Around {
            category: String::new(),
            area,
        };
        assert_eq!(query.validate(), Err(QueryError::EmptyInput));
    }
}
