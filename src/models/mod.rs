//! Data models for the TripSift engine
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: geographic coordinates with the validity guard
//! - Itinerary: destinations, days and the active focus
//! - Place: the saved-place shape consumed from the place library

pub mod coordinate;
pub mod itinerary;
pub mod place;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use itinerary::{Destination, Focus, Itinerary, ItineraryDay};
pub use place::Place;
