//! Per-place destination relevance scoring
//!
//! Geo evidence wins over text evidence. A positive proximity score is
//! returned immediately, and a place with a valid coordinate that falls
//! outside every anchor scores zero even when its location string names the
//! destination verbatim ("Outside Copenhagen", 130 km away). Text matching
//! is only trusted for places with no usable coordinate at all.

use tracing::debug;

use crate::config::RelevanceConfig;
use crate::models::{Coordinate, Focus, Itinerary, Place};
use crate::relevance::alias::token_match_score;
use crate::relevance::anchors::{Anchor, adjacent_days, resolve_anchors};
use crate::relevance::geo::distance_km;

/// How steeply the score falls off between the core and outer radii
const GEO_TAPER_FALLOFF: f64 = 0.7;

/// Everything the scorer needs for one focus, resolved once and reused
/// across a whole scoring pass
#[derive(Debug, Clone)]
pub struct RelevanceContext {
    focus: Focus,
    anchors: Vec<Anchor>,
    /// Destination names scored at full weight
    primary_names: Vec<String>,
    /// Adjacent-day destination names, scored at the adjacent weight
    adjacent_names: Vec<String>,
    /// External identity keys of the in-scope destinations
    external_ids: Vec<String>,
    adjacent_weight: f64,
}

impl RelevanceContext {
    /// Build the scoring context for an itinerary and focus
    #[must_use]
    pub fn new(itinerary: &Itinerary, focus: Focus, config: &RelevanceConfig) -> Self {
        let anchors = resolve_anchors(itinerary, focus, config);

        let (primary_names, adjacent_names) = match focus {
            Focus::WholeTrip => (itinerary.all_destination_names(), Vec::new()),
            Focus::Day(day_number) => {
                let primary = itinerary
                    .day(day_number)
                    .and_then(|d| d.destination_name.clone())
                    .map(|n| vec![n])
                    .unwrap_or_default();
                let adjacent = itinerary
                    .day(day_number)
                    .map(|focused| {
                        let (previous, next) = adjacent_days(itinerary, focused);
                        [previous, next]
                            .into_iter()
                            .flatten()
                            .filter_map(|d| d.destination_name.clone())
                            .collect()
                    })
                    .unwrap_or_default();
                (primary, adjacent)
            }
        };

        let in_scope_names: Vec<&String> = primary_names.iter().chain(&adjacent_names).collect();
        let external_ids = itinerary
            .destinations
            .iter()
            .filter(|d| {
                in_scope_names
                    .iter()
                    .any(|n| n.eq_ignore_ascii_case(&d.name))
            })
            .filter_map(|d| d.external_id.clone())
            .collect();

        Self {
            focus,
            anchors,
            primary_names,
            adjacent_names,
            external_ids,
            adjacent_weight: config.adjacent_day_weight,
        }
    }

    /// The resolved anchors, for debugging and map visualization
    #[must_use]
    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Whether destination filtering has anything to go on: any anchors or
    /// any named destinations at all
    #[must_use]
    pub fn has_filtering_basis(&self) -> bool {
        !self.anchors.is_empty()
            || !self.primary_names.is_empty()
            || !self.adjacent_names.is_empty()
    }
}

/// Relevance of a place to the focused part of the trip, in `[0, 1]`
#[must_use]
pub fn destination_score(place: &Place, ctx: &RelevanceContext) -> f64 {
    // Identity short-circuit: the place IS one of the trip's destinations
    if let Some(external_id) = &place.external_id {
        if ctx.external_ids.iter().any(|id| id == external_id) {
            return 1.0;
        }
    }

    if let Some(coordinate) = place.valid_coordinate() {
        if !ctx.anchors.is_empty() {
            let geo = geo_score(&coordinate, &ctx.anchors);
            if geo > 0.0 {
                return geo;
            }
            // Geo evidence explicitly says "not here"; a location string
            // that happens to name the destination must not override it
            debug!(
                "Place '{}' outside all anchors; text match suppressed",
                place.name
            );
        }
        return 0.0;
    }

    text_score(place, ctx)
}

/// Convenience boolean for badges, map clustering and similar ad-hoc use
#[must_use]
pub fn matches_destination(place: &Place, ctx: &RelevanceContext) -> bool {
    destination_score(place, ctx) > 0.0
}

/// Best weighted proximity score across the anchor set
fn geo_score(coordinate: &Coordinate, anchors: &[Anchor]) -> f64 {
    let mut best: f64 = 0.0;
    for anchor in anchors {
        let d = distance_km(coordinate, &anchor.coordinate);
        let raw = if d <= anchor.core_radius_km {
            1.0
        } else if d <= anchor.outer_radius_km {
            let span = anchor.outer_radius_km - anchor.core_radius_km;
            1.0 - GEO_TAPER_FALLOFF * (d - anchor.core_radius_km) / span
        } else {
            0.0
        };
        best = best.max(raw * anchor.weight);
    }
    best
}

fn text_score(place: &Place, ctx: &RelevanceContext) -> f64 {
    match ctx.focus {
        Focus::WholeTrip => {
            // A trip that declares no destinations at all filters nothing out
            if ctx.primary_names.is_empty() {
                return 1.0;
            }
            ctx.primary_names
                .iter()
                .map(|name| token_match_score(&place.location_text, name))
                .fold(0.0, f64::max)
        }
        Focus::Day(_) => {
            for name in &ctx.primary_names {
                let score = token_match_score(&place.location_text, name);
                if score > 0.0 {
                    return score;
                }
            }
            let best_adjacent = ctx
                .adjacent_names
                .iter()
                .map(|name| token_match_score(&place.location_text, name))
                .fold(0.0, f64::max);
            best_adjacent * ctx.adjacent_weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Destination, ItineraryDay};

    fn config() -> RelevanceConfig {
        RelevanceConfig::default()
    }

    fn copenhagen_trip() -> Itinerary {
        Itinerary {
            days: vec![ItineraryDay::new(1).in_destination("Copenhagen")],
            destinations: vec![Destination::named("Copenhagen").with_coordinate(55.6761, 12.5683)],
            destination_names: vec![],
        }
    }

    #[test]
    fn test_place_inside_core_scores_full() {
        let ctx = RelevanceContext::new(&copenhagen_trip(), Focus::Day(1), &config());
        // Barr, about 1 km from the Copenhagen center, well inside the
        // 25 km override core
        let place =
            Place::new("p1", "Barr", "Nørrebro, Copenhagen").with_coordinate(55.686, 12.565);
        assert_eq!(destination_score(&place, &ctx), 1.0);
    }

    #[test]
    fn test_geo_overrides_text_evidence() {
        let ctx = RelevanceContext::new(&copenhagen_trip(), Focus::Day(1), &config());
        // Aarhus is about 155 km away; the location string naming
        // Copenhagen must not rescue it
        let place =
            Place::new("p1", "Gastromé", "Outside Copenhagen").with_coordinate(56.1572, 10.2107);
        assert_eq!(destination_score(&place, &ctx), 0.0);
        assert!(!matches_destination(&place, &ctx));
    }

    #[test]
    fn test_taper_zone_scores_between_core_and_zero() {
        let ctx = RelevanceContext::new(&copenhagen_trip(), Focus::Day(1), &config());
        // Roskilde, about 30 km out: past the 25 km core, inside the
        // 40 km outer radius
        let place = Place::new("p1", "Snekken", "Roskilde").with_coordinate(55.6415, 12.0803);
        let score = destination_score(&place, &ctx);
        assert!(score > 0.0 && score < 1.0, "unexpected score: {score}");
    }

    #[test]
    fn test_text_match_only_without_coordinate() {
        let ctx = RelevanceContext::new(&copenhagen_trip(), Focus::Day(1), &config());
        let place = Place::new("p1", "Barr", "Nørrebro, Copenhagen");
        assert_eq!(destination_score(&place, &ctx), 0.7);
    }

    #[test]
    fn test_identity_short_circuit() {
        let mut itinerary = copenhagen_trip();
        itinerary.destinations[0].external_id = Some("ext-cph-1".to_string());
        let ctx = RelevanceContext::new(&itinerary, Focus::Day(1), &config());

        // Even a far-away coordinate cannot demote an identity match
        let place = Place::new("p1", "Copenhagen", "Denmark")
            .with_external_id("ext-cph-1")
            .with_coordinate(40.0, -3.0);
        assert_eq!(destination_score(&place, &ctx), 1.0);
    }

    #[test]
    fn test_adjacent_day_text_attribution() {
        let itinerary = Itinerary {
            days: vec![
                ItineraryDay::new(1).in_destination("Hamlet Hollow"),
                ItineraryDay::new(2).in_destination("Duskmere"),
            ],
            // No geocodes: pure text path
            destinations: vec![],
            destination_names: vec![],
        };
        let ctx = RelevanceContext::new(&itinerary, Focus::Day(1), &config());

        // Scores 0.7 against day 2's destination, attributed to day 1 at
        // the 0.55 adjacent weight
        let place = Place::new("p1", "The Mill", "Duskmere");
        let score = destination_score(&place, &ctx);
        assert!((score - 0.7 * 0.55).abs() < 1e-9, "unexpected score: {score}");
    }

    #[test]
    fn test_primary_text_match_beats_adjacent() {
        let itinerary = Itinerary {
            days: vec![
                ItineraryDay::new(1).in_destination("Hamlet Hollow"),
                ItineraryDay::new(2).in_destination("Duskmere"),
            ],
            destinations: vec![],
            destination_names: vec![],
        };
        let ctx = RelevanceContext::new(&itinerary, Focus::Day(1), &config());
        let place = Place::new("p1", "The Forge", "Hamlet Hollow");
        assert_eq!(destination_score(&place, &ctx), 0.7);
    }

    #[test]
    fn test_whole_trip_without_destinations_is_permissive() {
        let ctx = RelevanceContext::new(&Itinerary::default(), Focus::WholeTrip, &config());
        let place = Place::new("p1", "Somewhere", "Anywhere");
        assert_eq!(destination_score(&place, &ctx), 1.0);
        assert!(!ctx.has_filtering_basis());
    }

    #[test]
    fn test_whole_trip_text_takes_best_destination() {
        let itinerary = Itinerary {
            days: vec![],
            destinations: vec![],
            destination_names: vec!["Lisbon".to_string(), "Porto".to_string()],
        };
        let ctx = RelevanceContext::new(&itinerary, Focus::WholeTrip, &config());
        assert!(ctx.has_filtering_basis());

        let place = Place::new("p1", "Cervejaria", "Porto, Portugal");
        assert_eq!(destination_score(&place, &ctx), 0.7);

        let miss = Place::new("p2", "Bar", "Madrid, Spain");
        assert_eq!(destination_score(&miss, &ctx), 0.0);
    }

    #[test]
    fn test_anchor_weight_scales_geo_score() {
        let itinerary = Itinerary {
            days: vec![
                ItineraryDay::new(1).in_destination("Copenhagen"),
                ItineraryDay::new(2).in_destination("Gothenburg"),
            ],
            destinations: vec![
                Destination::named("Copenhagen").with_coordinate(55.6761, 12.5683),
                Destination::named("Gothenburg").with_coordinate(57.7089, 11.9746),
            ],
            destination_names: vec![],
        };
        let ctx = RelevanceContext::new(&itinerary, Focus::Day(1), &config());

        // Dead center of Gothenburg: full raw score against the adjacent
        // anchor, scaled by the 0.55 weight; 230 km outside Copenhagen's own
        let place = Place::new("p1", "Koka", "Gothenburg").with_coordinate(57.7089, 11.9746);
        let score = destination_score(&place, &ctx);
        assert!((score - 0.55).abs() < 1e-9, "unexpected score: {score}");
    }
}
