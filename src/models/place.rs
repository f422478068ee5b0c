//! Saved place model
//!
//! Places are owned and maintained by the place-library collaborator; the
//! relevance engine reads them and never mutates the pool.

use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// A saved place from the traveler's library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    /// Library-internal identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text location string ("Nørrebro, Copenhagen", "near Kyoto", ...)
    pub location_text: String,
    /// Geocoded position, if the importer resolved one
    pub coordinate: Option<Coordinate>,
    /// External place identity key (same keyspace as destination geocodes)
    pub external_id: Option<String>,
    /// Category tag ("restaurant", "museum", ...)
    pub category: Option<String>,
    /// Which import source this place came from
    pub source_tag: Option<String>,
    /// Traveler's own note
    pub note: Option<String>,
}

impl Place {
    /// Create a place with the required fields
    #[must_use]
    pub fn new<S: Into<String>>(id: S, name: S, location_text: S) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location_text: location_text.into(),
            coordinate: None,
            external_id: None,
            category: None,
            source_tag: None,
            note: None,
        }
    }

    /// Attach a coordinate
    #[must_use]
    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    /// Attach an external identity key
    #[must_use]
    pub fn with_external_id<S: Into<String>>(mut self, external_id: S) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Attach a category tag
    #[must_use]
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a source tag
    #[must_use]
    pub fn with_source<S: Into<String>>(mut self, source_tag: S) -> Self {
        self.source_tag = Some(source_tag.into());
        self
    }

    /// Attach a note
    #[must_use]
    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = Some(note.into());
        self
    }

    /// The place coordinate, validated (sentinel and out-of-range are absent)
    #[must_use]
    pub fn valid_coordinate(&self) -> Option<Coordinate> {
        Coordinate::checked_opt(self.coordinate)
    }

    /// Case-insensitive substring match over name, location text and note
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.location_text.to_lowercase().contains(&query)
            || self
                .note
                .as_ref()
                .is_some_and(|note| note.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search_checks_name_location_and_note() {
        let place = Place::new("p1", "Barr", "Nørrebro, Copenhagen")
            .with_note("book ahead for the schnitzel");

        assert!(place.matches_search("barr"));
        assert!(place.matches_search("copenhagen"));
        assert!(place.matches_search("SCHNITZEL"));
        assert!(!place.matches_search("tokyo"));
    }

    #[test]
    fn test_matches_search_empty_query_matches_everything() {
        let place = Place::new("p1", "Barr", "Copenhagen");
        assert!(place.matches_search(""));
        assert!(place.matches_search("   "));
    }

    #[test]
    fn test_valid_coordinate_filters_sentinel() {
        let place = Place::new("p1", "Ghost", "nowhere").with_coordinate(0.0, 0.0);
        assert_eq!(place.valid_coordinate(), None);
    }
}
