//! Anchor resolution: turning itinerary + focus into weighted geo anchors
//!
//! Travel days are not hard boundaries. A restaurant equidistant between two
//! day-destinations should still surface, ranked behind same-day matches, so
//! the adjacent days contribute anchors at a reduced fixed weight instead of
//! being cut off.

use serde::Serialize;
use tracing::debug;

use crate::config::RelevanceConfig;
use crate::models::{Coordinate, Destination, Focus, Itinerary, ItineraryDay};
use crate::relevance::geo::distance_km;
use crate::relevance::radius::radius_for;

/// Weight of the focused day's own anchor
const PRIMARY_WEIGHT: f64 = 1.0;

/// A weighted geographic anchor, computed fresh per query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anchor {
    pub coordinate: Coordinate,
    pub core_radius_km: f64,
    pub outer_radius_km: f64,
    /// Relative weight in (0, 1]
    pub weight: f64,
}

/// Resolve the weighted anchor set for the current focus.
///
/// Anchors are only added where a valid coordinate resolves; missing geocode
/// data silently yields fewer (possibly zero) anchors, never an error.
#[must_use]
pub fn resolve_anchors(
    itinerary: &Itinerary,
    focus: Focus,
    config: &RelevanceConfig,
) -> Vec<Anchor> {
    let anchors = match focus {
        Focus::WholeTrip => whole_trip_anchors(itinerary, config),
        Focus::Day(day_number) => day_anchors(itinerary, day_number, config),
    };
    debug!("Resolved {} anchors for {:?}", anchors.len(), focus);
    anchors
}

/// One anchor per geocoded destination, plus lodging anchors that are not
/// already covered by a nearby destination anchor
fn whole_trip_anchors(itinerary: &Itinerary, config: &RelevanceConfig) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    for destination in &itinerary.destinations {
        if let Some(coordinate) = destination.valid_coordinate() {
            let (core_radius_km, outer_radius_km) = radius_for(destination, config);
            anchors.push(Anchor {
                coordinate,
                core_radius_km,
                outer_radius_km,
                weight: PRIMARY_WEIGHT,
            });
        }
    }

    for day in &itinerary.days {
        let Some(lodging) = day.valid_lodging() else {
            continue;
        };
        // A lodging sitting inside its own city anchor adds nothing
        let covered = anchors
            .iter()
            .any(|a| distance_km(&a.coordinate, &lodging) <= config.lodging_dedup_km);
        if covered {
            continue;
        }

        let (core_radius_km, outer_radius_km) = match day.destination_name.as_deref() {
            Some(name) => radii_for_name(itinerary, name, config),
            None => urban_radii(config),
        };
        debug!(
            "Adding lodging anchor for day {} at {}",
            day.day_number,
            lodging.format_coordinates()
        );
        anchors.push(Anchor {
            coordinate: lodging,
            core_radius_km,
            outer_radius_km,
            weight: PRIMARY_WEIGHT,
        });
    }

    anchors
}

/// The focused day's anchor at full weight, plus the nearest previous and
/// next days with a different destination at the adjacent weight
fn day_anchors(itinerary: &Itinerary, day_number: u32, config: &RelevanceConfig) -> Vec<Anchor> {
    let Some(focused) = itinerary.day(day_number) else {
        debug!("No itinerary day {day_number}; yielding zero anchors");
        return Vec::new();
    };

    let mut anchors = Vec::new();
    if let Some((coordinate, (core_radius_km, outer_radius_km))) =
        resolve_day_anchor(itinerary, focused, config)
    {
        anchors.push(Anchor {
            coordinate,
            core_radius_km,
            outer_radius_km,
            weight: PRIMARY_WEIGHT,
        });
    }

    let (previous, next) = adjacent_days(itinerary, focused);

    for adjacent in [previous, next].into_iter().flatten() {
        if let Some((coordinate, (core_radius_km, outer_radius_km))) =
            resolve_day_anchor(itinerary, adjacent, config)
        {
            debug!(
                "Adding adjacent anchor from day {} for day {}",
                adjacent.day_number, day_number
            );
            anchors.push(Anchor {
                coordinate,
                core_radius_km,
                outer_radius_km,
                weight: config.adjacent_day_weight,
            });
        }
    }

    anchors
}

/// The nearest previous and nearest next day carrying a destination different
/// from the focused day's
pub(crate) fn adjacent_days<'a>(
    itinerary: &'a Itinerary,
    focused: &ItineraryDay,
) -> (Option<&'a ItineraryDay>, Option<&'a ItineraryDay>) {
    let previous = itinerary
        .days
        .iter()
        .filter(|d| d.day_number < focused.day_number)
        .filter(|d| has_different_destination(d, focused))
        .max_by_key(|d| d.day_number);
    let next = itinerary
        .days
        .iter()
        .filter(|d| d.day_number > focused.day_number)
        .filter(|d| has_different_destination(d, focused))
        .min_by_key(|d| d.day_number);
    (previous, next)
}

/// Resolve a day to a coordinate and radii: the destination's geocode first,
/// else the nearest (by day distance) lodging recorded for any day sharing
/// the destination name, else the day's own lodging when it has no name
fn resolve_day_anchor(
    itinerary: &Itinerary,
    day: &ItineraryDay,
    config: &RelevanceConfig,
) -> Option<(Coordinate, (f64, f64))> {
    match day.destination_name.as_deref() {
        Some(name) => {
            let coordinate = itinerary
                .destination_by_name(name)
                .and_then(Destination::valid_coordinate)
                .or_else(|| nearest_lodging_for_name(itinerary, name, day.day_number));
            coordinate.map(|c| (c, radii_for_name(itinerary, name, config)))
        }
        None => day.valid_lodging().map(|c| (c, urban_radii(config))),
    }
}

fn nearest_lodging_for_name(
    itinerary: &Itinerary,
    name: &str,
    reference_day: u32,
) -> Option<Coordinate> {
    itinerary
        .days
        .iter()
        .filter(|d| {
            d.destination_name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .filter_map(|d| d.valid_lodging().map(|c| (d.day_number, c)))
        .min_by_key(|(day_number, _)| day_number.abs_diff(reference_day))
        .map(|(_, coordinate)| coordinate)
}

fn has_different_destination(day: &ItineraryDay, focused: &ItineraryDay) -> bool {
    match (&day.destination_name, &focused.destination_name) {
        (Some(a), Some(b)) => !a.eq_ignore_ascii_case(b),
        // Any named neighbor differs from an unnamed focused day; a nameless
        // neighbor offers no destination to anchor on
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn radii_for_name(itinerary: &Itinerary, name: &str, config: &RelevanceConfig) -> (f64, f64) {
    match itinerary.destination_by_name(name) {
        Some(destination) => radius_for(destination, config),
        None => radius_for(&Destination::named(name), config),
    }
}

fn urban_radii(config: &RelevanceConfig) -> (f64, f64) {
    (
        config.urban_core_km,
        config.urban_core_km * config.taper_ratio,
    )
}
