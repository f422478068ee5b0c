//! Geographic coordinate with validity guard

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    ///
    /// Prefer [`Coordinate::checked`] for anything coming from external data.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate a candidate coordinate, treating unusable values as absent.
    ///
    /// Returns `None` for the `(0, 0)` null-island sentinel (upstream data
    /// sources emit it for "no geocode") and for values outside the valid
    /// latitude/longitude ranges. Every coordinate read from itinerary or
    /// place data must pass through this guard before use.
    #[must_use]
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude == 0.0 && longitude == 0.0 {
            return None;
        }
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Re-validate an optional coordinate that may carry sentinel values.
    #[must_use]
    pub fn checked_opt(coordinate: Option<Coordinate>) -> Option<Self> {
        coordinate.and_then(|c| Self::checked(c.latitude, c.longitude))
    }

    /// Format as a "lat, lng" string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_paris_is_valid() {
        let paris = Coordinate::checked(48.8566, 2.3522);
        assert_eq!(paris, Some(Coordinate::new(48.8566, 2.3522)));
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(91.0, 0.0)]
    #[case(-90.5, 10.0)]
    #[case(45.0, 180.5)]
    #[case(f64::NAN, 2.0)]
    fn test_invalid_coordinates_are_absent(#[case] lat: f64, #[case] lng: f64) {
        assert_eq!(Coordinate::checked(lat, lng), None);
    }

    #[test]
    fn test_null_island_sentinel_not_treated_as_origin() {
        // (0, 0) means "missing", but a coordinate on the equator is fine
        assert_eq!(Coordinate::checked(0.0, 0.0), None);
        assert_eq!(
            Coordinate::checked(0.0, 6.6),
            Some(Coordinate::new(0.0, 6.6))
        );
    }

    #[test]
    fn test_checked_opt_rejects_sentinel() {
        let sentinel = Some(Coordinate::new(0.0, 0.0));
        assert_eq!(Coordinate::checked_opt(sentinel), None);

        let copenhagen = Some(Coordinate::new(55.6761, 12.5683));
        assert_eq!(Coordinate::checked_opt(copenhagen), copenhagen);
    }

    #[test]
    fn test_format_coordinates() {
        let c = Coordinate::new(46.8182, 8.2275);
        assert_eq!(c.format_coordinates(), "46.8182, 8.2275");
    }
}
