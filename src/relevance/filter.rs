//! Filter pipeline: destination relevance composed with the list filters
//!
//! Free-text search deliberately bypasses destination filtering: a user
//! typing a name or city expects to find the place regardless of which day
//! is focused.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::RelevanceConfig;
use crate::models::{Focus, Itinerary, Place};
use crate::relevance::scorer::{RelevanceContext, destination_score};

/// The active query state: focus plus the list filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceQuery {
    /// Which part of the trip is focused
    pub focus: Focus,
    /// Keep only places with this category
    pub category: Option<String>,
    /// Keep only places from this import source
    pub source: Option<String>,
    /// Free-text search over name, location and note
    pub search: String,
}

impl PlaceQuery {
    /// Query for a focus with no other filters
    #[must_use]
    pub fn for_focus(focus: Focus) -> Self {
        Self {
            focus,
            ..Self::default()
        }
    }

    /// Restrict to a category
    #[must_use]
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to an import source
    #[must_use]
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the free-text search
    #[must_use]
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = search.into();
        self
    }
}

/// A place together with its destination relevance score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPlace<'a> {
    pub place: &'a Place,
    pub score: f64,
}

/// Run the full pipeline: destination relevance, then category, source and
/// free-text filters
#[must_use]
pub fn filter_places<'a>(
    pool: &'a [Place],
    itinerary: &Itinerary,
    query: &PlaceQuery,
    config: &RelevanceConfig,
) -> Vec<ScoredPlace<'a>> {
    let ctx = RelevanceContext::new(itinerary, query.focus, config);
    filter_places_with_context(pool, &ctx, query)
}

/// Same pipeline against a pre-resolved context, for callers re-querying a
/// large pool under an unchanged focus
#[must_use]
pub fn filter_places_with_context<'a>(
    pool: &'a [Place],
    ctx: &RelevanceContext,
    query: &PlaceQuery,
) -> Vec<ScoredPlace<'a>> {
    let search_active = !query.search.trim().is_empty();

    let mut results: Vec<ScoredPlace<'a>> = pool
        .iter()
        .map(|place| ScoredPlace {
            place,
            score: destination_score(place, ctx),
        })
        .collect();

    // Search is global across the pool; otherwise filter and rank by
    // destination relevance, provided the itinerary gives us anything to
    // filter against
    if !search_active && ctx.has_filtering_basis() {
        results.retain(|scored| scored.score > 0.0);
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    }

    if let Some(category) = &query.category {
        results.retain(|scored| scored.place.category.as_deref() == Some(category.as_str()));
    }
    if let Some(source) = &query.source {
        results.retain(|scored| scored.place.source_tag.as_deref() == Some(source.as_str()));
    }
    if search_active {
        results.retain(|scored| scored.place.matches_search(&query.search));
    }

    results
}
