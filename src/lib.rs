//! `TripSift` - destination relevance for saved places and travel itineraries
//!
//! This library decides which of a traveler's saved places belong to the
//! part of the trip currently in focus (the whole trip, or one day and its
//! neighbors), combining adaptive-radius geo proximity with alias-aware
//! text matching, and composes the result with category, source and
//! free-text filters.

pub mod config;
pub mod error;
pub mod models;
pub mod relevance;

// Re-export core types for public API
pub use config::RelevanceConfig;
pub use error::TripSiftError;
pub use models::{Coordinate, Destination, Focus, Itinerary, ItineraryDay, Place};
pub use relevance::{
    Anchor, PlaceQuery, RelevanceContext, RelevanceEngine, ScoredPlace, destination_score,
    distance_km, filter_places, matches_destination, resolve_anchors, token_match_score,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripSiftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
