//! Destination relevance engine
//!
//! Decides which saved places are "of" the part of the trip the user is
//! focused on, combining:
//! - adaptive-radius proximity scoring against weighted anchors, and
//! - alias-aware tokenized text matching of location strings,
//!
//! with geo evidence winning whenever both are available. The engine is a
//! pure computation over its inputs: no I/O, no shared state, safe to call
//! from any thread.

pub mod alias;
pub mod anchors;
pub mod filter;
pub mod geo;
pub mod radius;
pub mod scorer;

// Re-export commonly used types and functions from submodules
pub use alias::{
    resolve_aliases, split_compound_destination, strip_vague_qualifiers, token_match_score,
    tokenize,
};
pub use anchors::{Anchor, resolve_anchors};
pub use filter::{PlaceQuery, ScoredPlace, filter_places, filter_places_with_context};
pub use geo::distance_km;
pub use radius::{RADIUS_OVERRIDES, radius_for};
pub use scorer::{RelevanceContext, destination_score, matches_destination};

use crate::config::RelevanceConfig;
use crate::models::{Focus, Itinerary, Place};

/// Configured entry point for the relevance engine.
///
/// Anchor resolution is separated from per-place scoring on purpose: build a
/// [`RelevanceContext`] once per focus and reuse it across a whole pool.
#[derive(Debug, Clone, Default)]
pub struct RelevanceEngine {
    config: RelevanceConfig,
}

impl RelevanceEngine {
    /// Create an engine with the given tuning configuration
    #[must_use]
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &RelevanceConfig {
        &self.config
    }

    /// Resolve the weighted anchor set for a focus, for scoring or for
    /// visualizing why a place matched
    #[must_use]
    pub fn resolve_anchors(&self, itinerary: &Itinerary, focus: Focus) -> Vec<Anchor> {
        anchors::resolve_anchors(itinerary, focus, &self.config)
    }

    /// Build a reusable scoring context for a focus
    #[must_use]
    pub fn context(&self, itinerary: &Itinerary, focus: Focus) -> RelevanceContext {
        RelevanceContext::new(itinerary, focus, &self.config)
    }

    /// Relevance of one place to the focused part of the trip, in `[0, 1]`
    #[must_use]
    pub fn destination_score(&self, place: &Place, ctx: &RelevanceContext) -> f64 {
        scorer::destination_score(place, ctx)
    }

    /// Whether a place belongs to the focused part of the trip
    #[must_use]
    pub fn matches_destination(&self, place: &Place, ctx: &RelevanceContext) -> bool {
        scorer::matches_destination(place, ctx)
    }

    /// The filtered, relevance-ranked place list for a query
    #[must_use]
    pub fn filter_places<'a>(
        &self,
        pool: &'a [Place],
        itinerary: &Itinerary,
        query: &PlaceQuery,
    ) -> Vec<ScoredPlace<'a>> {
        filter::filter_places(pool, itinerary, query, &self.config)
    }
}
