//! Radius policy: how far from a destination's center still counts as "there"
//!
//! A single fixed radius is wrong at both ends. It falsely excludes
//! legitimate day-trip spots around large urban or regional anchors, and it
//! falsely includes unrelated towns around tiny, dense destinations. The
//! policy here is the tested compromise: urban/regional defaults, a taper
//! ratio for the outer ring, and an ordered override table for destinations
//! the defaults get wrong.

use crate::config::RelevanceConfig;
use crate::models::Destination;
use crate::relevance::alias::tokenize;

/// Explicit per-destination core radii, checked before the urban/regional
/// heuristic. This is an ordered list, not a map: destination-name substrings
/// overlap ("Amalfi" appears inside longer addresses), so first match wins.
pub const RADIUS_OVERRIDES: &[(&str, f64)] = &[
    // Compact regions, smaller than the regional default
    ("cinque terre", 20.0),
    ("amalfi", 30.0),
    ("capri", 15.0),
    ("positano", 12.0),
    ("santorini", 15.0),
    ("lake bled", 20.0),
    // Urban areas whose day-trip orbit is wider than the urban default
    ("reykjavik", 40.0),
    ("reykjavík", 40.0),
    ("los angeles", 28.0),
    ("copenhagen", 25.0),
    ("københavn", 25.0),
    ("berlin", 25.0),
    ("marrakech", 30.0),
    ("queenstown", 35.0),
    // Oversized regions, wider than the regional default
    ("kruger", 150.0),
    ("sabi sand", 150.0),
    ("limpopo", 150.0),
    ("scottish highlands", 120.0),
    ("serengeti", 100.0),
    ("masai mara", 100.0),
    ("rajasthan", 200.0),
    ("sicily", 130.0),
    ("sicilia", 130.0),
    ("patagonia", 250.0),
    ("iceland", 120.0),
    ("namibia", 250.0),
];

/// Words that mark a destination name or address as a multi-town region
const REGION_WORDS: &[&str] = &[
    "coast",
    "valley",
    "region",
    "island",
    "islands",
    "lake",
    "lakes",
    "highlands",
    "safari",
    "reserve",
    "peninsula",
    "shire",
    "prefecture",
    "district",
    "national park",
    "mountains",
    "alps",
    "fjord",
    "fjords",
    "desert",
    "delta",
    "archipelago",
    "riviera",
    "countryside",
    "wine country",
];

/// Known multi-town regions whose names carry no region-type word
const KNOWN_REGIONS: &[&str] = &[
    "tuscany",
    "toscana",
    "provence",
    "dolomites",
    "dolomiti",
    "cotswolds",
    "algarve",
    "andalusia",
    "andalucia",
    "andalucía",
    "basque country",
    "galicia",
    "brittany",
    "bretagne",
    "normandy",
    "normandie",
    "bavaria",
    "black forest",
    "snowdonia",
    "puglia",
    "umbria",
    "liguria",
    "sardinia",
    "sardegna",
    "corsica",
    "crete",
    "cyclades",
    "peloponnese",
    "transylvania",
    "dalmatia",
    "istria",
    "okinawa",
    "hokkaido",
    "kerala",
    "goa",
    "bali",
    "lombok",
    "yucatan",
    "yucatán",
    "oaxaca",
    "baja california",
    "sonoma",
    "big sur",
    "yellowstone",
    "yosemite",
    "banff",
    "tasmania",
    "kimberley",
    "outback",
    "atlas",
    "sahara",
    "namib",
    "okavango",
    "garden route",
    "cappadocia",
    "azores",
    "madeira",
    "lofoten",
    "lapland",
    "svalbard",
    "westfjords",
    "golden circle",
    "south tyrol",
];

/// Core and outer radii for a destination, in kilometers.
///
/// Override table first (first match wins), then the urban/regional
/// classification heuristic, with the outer radius tapering off at
/// `core × taper_ratio`.
#[must_use]
pub fn radius_for(destination: &Destination, config: &RelevanceConfig) -> (f64, f64) {
    let haystack = normalized_haystack(destination);

    for (pattern, core_km) in RADIUS_OVERRIDES {
        if contains_phrase(&haystack, pattern) {
            return (*core_km, core_km * config.taper_ratio);
        }
    }

    let core_km = if is_regional(destination, &haystack) {
        config.regional_core_km
    } else {
        config.urban_core_km
    };
    (core_km, core_km * config.taper_ratio)
}

fn is_regional(destination: &Destination, haystack: &str) -> bool {
    if REGION_WORDS.iter().any(|w| contains_phrase(haystack, w)) {
        return true;
    }
    if KNOWN_REGIONS.iter().any(|r| contains_phrase(haystack, r)) {
        return true;
    }
    address_implies_sub_area(destination)
}

/// When the geocoder's first address segment shares no name material with the
/// destination itself, the destination is a sub-area of something larger and
/// gets the regional radius. "Val d'Orcia" geocoding to "Province of Siena,
/// Italy" is the shape this catches.
fn address_implies_sub_area(destination: &Destination) -> bool {
    let Some(address) = &destination.formatted_address else {
        return false;
    };
    let Some(first_segment) = address.split(',').next() else {
        return false;
    };

    let name_tokens = tokenize(&destination.name);
    let segment_tokens = tokenize(first_segment);
    if name_tokens.is_empty() || segment_tokens.is_empty() {
        return false;
    }

    let overlaps = segment_tokens.iter().any(|seg| {
        name_tokens.iter().any(|name| {
            seg == name
                || (seg.len() >= 4 && name.contains(seg.as_str()))
                || (name.len() >= 4 && seg.contains(name.as_str()))
        })
    });
    !overlaps
}

/// Phrase containment over token boundaries, so "lake" matches "Lake Como"
/// but not "Lakeland"
fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let padded = format!(" {haystack} ");
    padded.contains(&format!(" {phrase} "))
}

fn normalized_haystack(destination: &Destination) -> String {
    let mut text = destination.name.to_lowercase();
    if let Some(address) = &destination.formatted_address {
        text.push(' ');
        text.push_str(&address.to_lowercase());
    }
    // Collapse punctuation so comma-separated addresses token-match cleanly
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
