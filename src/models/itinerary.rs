//! Itinerary models: destinations, days and the active focus
//!
//! These mirror the shapes owned by the trip-planning collaborator. The
//! engine consumes them read-only and never resolves or geocodes anything
//! itself.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// A resolved trip destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Destination name as the traveler entered it
    pub name: String,
    /// Geocoded center, if resolution succeeded
    pub coordinate: Option<Coordinate>,
    /// Canonical formatted address from the geocoder
    pub formatted_address: Option<String>,
    /// External place identity key, used for exact-match short-circuiting
    pub external_id: Option<String>,
}

impl Destination {
    /// Create a destination with just a name
    #[must_use]
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            coordinate: None,
            formatted_address: None,
            external_id: None,
        }
    }

    /// Attach a geocoded center
    #[must_use]
    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    /// Attach a formatted address
    #[must_use]
    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.formatted_address = Some(address.into());
        self
    }

    /// The geocoded center, validated (null-island and out-of-range are absent)
    #[must_use]
    pub fn valid_coordinate(&self) -> Option<Coordinate> {
        Coordinate::checked_opt(self.coordinate)
    }
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based day index within the trip
    pub day_number: u32,
    /// Calendar date, when the trip is date-pinned
    pub date: Option<NaiveDate>,
    /// Destination name this day is spent in, if broken down per day
    pub destination_name: Option<String>,
    /// Coordinates of the night's lodging, if booked and geocoded
    pub lodging_coordinate: Option<Coordinate>,
}

impl ItineraryDay {
    /// Create a bare day
    #[must_use]
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            date: None,
            destination_name: None,
            lodging_coordinate: None,
        }
    }

    /// Set the destination name
    #[must_use]
    pub fn in_destination<S: Into<String>>(mut self, name: S) -> Self {
        self.destination_name = Some(name.into());
        self
    }

    /// Set the lodging coordinate
    #[must_use]
    pub fn with_lodging(mut self, latitude: f64, longitude: f64) -> Self {
        self.lodging_coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    /// The lodging coordinate, validated
    #[must_use]
    pub fn valid_lodging(&self) -> Option<Coordinate> {
        Coordinate::checked_opt(self.lodging_coordinate)
    }
}

/// A trip itinerary as consumed from the planning collaborator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Itinerary {
    /// Ordered day-by-day breakdown (may be empty for loosely planned trips)
    pub days: Vec<ItineraryDay>,
    /// Resolved destinations with geocodes and addresses
    pub destinations: Vec<Destination>,
    /// Flat destination-name list, the fallback when no day breakdown exists
    pub destination_names: Vec<String>,
}

impl Itinerary {
    /// Look up a resolved destination by name, case-insensitive
    #[must_use]
    pub fn destination_by_name(&self, name: &str) -> Option<&Destination> {
        self.destinations
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// The day at a given day number
    #[must_use]
    pub fn day(&self, day_number: u32) -> Option<&ItineraryDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Every destination name the trip mentions: per-day names, resolved
    /// destination names, and the flat fallback list, deduplicated in order.
    #[must_use]
    pub fn all_destination_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            let name = name.trim();
            if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name.to_string());
            }
        };

        for day in &self.days {
            if let Some(name) = &day.destination_name {
                push(name);
            }
        }
        for destination in &self.destinations {
            push(&destination.name);
        }
        for name in &self.destination_names {
            push(name);
        }
        names
    }
}

/// Which part of the itinerary the user is currently focused on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    /// No day selected; the whole trip is in scope
    WholeTrip,
    /// A specific day (1-based) is selected
    Day(u32),
}

impl Default for Focus {
    fn default() -> Self {
        Self::WholeTrip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_valid_coordinate_filters_sentinel() {
        let unresolved = Destination::named("Nowhere").with_coordinate(0.0, 0.0);
        assert_eq!(unresolved.valid_coordinate(), None);

        let copenhagen = Destination::named("Copenhagen").with_coordinate(55.6761, 12.5683);
        assert!(copenhagen.valid_coordinate().is_some());
    }

    #[test]
    fn test_all_destination_names_dedupes_across_sources() {
        let itinerary = Itinerary {
            days: vec![
                ItineraryDay::new(1).in_destination("Rome"),
                ItineraryDay::new(2).in_destination("rome"),
                ItineraryDay::new(3).in_destination("Florence"),
            ],
            destinations: vec![Destination::named("Rome")],
            destination_names: vec!["Florence".to_string(), "Siena".to_string()],
        };

        let names = itinerary.all_destination_names();
        assert_eq!(names, vec!["Rome", "Florence", "Siena"]);
    }

    #[test]
    fn test_destination_by_name_is_case_insensitive() {
        let itinerary = Itinerary {
            days: vec![],
            destinations: vec![Destination::named("Lisbon")],
            destination_names: vec![],
        };
        assert!(itinerary.destination_by_name("lisbon").is_some());
        assert!(itinerary.destination_by_name("Porto").is_none());
    }
}
