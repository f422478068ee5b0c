//! Text normalization, alias resolution and tokenized destination matching
//!
//! Free-text place locations name destinations in every way travelers do:
//! abbreviations ("NYC"), local-language names ("Firenze"), neighborhoods
//! ("Nørrebro"), compounds ("Noto / Syracuse") and vague qualifiers
//! ("just outside Kyoto"). This module reduces both sides to comparable
//! token sets before the scorer consults them.

use std::collections::HashSet;

/// Score when every destination token matched a place token exactly
pub const EXACT_MATCH_SCORE: f64 = 0.7;
/// Score when the best full match needed substring containment
pub const SUBSTRING_MATCH_SCORE: f64 = 0.5;

/// Minimum token length for substring containment to count as a match
const SUBSTRING_MIN_LEN: usize = 4;

/// Stop words dropped during tokenization: articles and prepositions in the
/// languages our destination data actually contains, generic administrative
/// words, and the vague-qualifier vocabulary itself.
const STOP_WORDS: &[&str] = &[
    // articles / prepositions
    "a", "an", "the", "of", "in", "on", "at", "by", "and", "or", "de", "del", "della", "delle",
    "dei", "di", "da", "du", "des", "le", "les", "la", "el", "los", "las", "und", "von", "van",
    "im", "am", "zum", "zur", "bei", "et", "e", "y",
    // generic administrative words
    "city", "region", "district", "province", "county", "borough", "town", "village",
    // vague-qualifier vocabulary
    "near", "outside", "around", "close", "to", "just", "about", "from", "greater", "area",
    "vicinity", "outskirts",
    // Japanese ward suffix, also handled as a token of its own
    "ku",
];

/// Alias table: abbreviations, local-language city names, and
/// neighborhood/borough/ward names mapped to their parent city. Ambiguous
/// neighborhood names map to every candidate parent; the scorer keeps the
/// best candidate and geo evidence breaks ties in practice.
const ALIAS_MAP: &[(&str, &[&str])] = &[
    // abbreviations
    ("nyc", &["new york"]),
    ("sf", &["san francisco"]),
    ("vegas", &["las vegas"]),
    ("cdmx", &["mexico city"]),
    ("bkk", &["bangkok"]),
    ("rio", &["rio de janeiro"]),
    // local-language city names
    ("københavn", &["copenhagen"]),
    ("kobenhavn", &["copenhagen"]),
    ("roma", &["rome"]),
    ("firenze", &["florence"]),
    ("venezia", &["venice"]),
    ("napoli", &["naples"]),
    ("torino", &["turin"]),
    ("milano", &["milan"]),
    ("münchen", &["munich"]),
    ("muenchen", &["munich"]),
    ("köln", &["cologne"]),
    ("koln", &["cologne"]),
    ("wien", &["vienna"]),
    ("praha", &["prague"]),
    ("lisboa", &["lisbon"]),
    ("sevilla", &["seville"]),
    ("genève", &["geneva"]),
    ("geneve", &["geneva"]),
    ("athina", &["athens"]),
    // boroughs, wards and neighborhoods -> parent city
    ("brooklyn", &["new york"]),
    ("manhattan", &["new york"]),
    ("queens", &["new york"]),
    ("harlem", &["new york"]),
    ("bronx", &["new york"]),
    ("williamsburg", &["new york"]),
    ("shibuya", &["tokyo"]),
    ("shinjuku", &["tokyo"]),
    ("ginza", &["tokyo"]),
    ("asakusa", &["tokyo"]),
    ("harajuku", &["tokyo"]),
    ("roppongi", &["tokyo"]),
    ("meguro", &["tokyo"]),
    ("setagaya", &["tokyo"]),
    ("gion", &["kyoto"]),
    ("arashiyama", &["kyoto"]),
    ("montmartre", &["paris"]),
    ("marais", &["paris"]),
    ("belleville", &["paris"]),
    ("trastevere", &["rome"]),
    ("testaccio", &["rome"]),
    ("nørrebro", &["copenhagen"]),
    ("norrebro", &["copenhagen"]),
    ("vesterbro", &["copenhagen"]),
    ("christianshavn", &["copenhagen"]),
    ("kreuzberg", &["berlin"]),
    ("neukölln", &["berlin"]),
    ("neukolln", &["berlin"]),
    ("prenzlauer berg", &["berlin"]),
    ("brera", &["milan"]),
    ("navigli", &["milan"]),
    ("alfama", &["lisbon"]),
    ("belém", &["lisbon"]),
    ("belem", &["lisbon"]),
    ("gràcia", &["barcelona"]),
    ("gracia", &["barcelona"]),
    ("eixample", &["barcelona"]),
    ("raval", &["barcelona"]),
    ("notting hill", &["london"]),
    ("shoreditch", &["london"]),
    ("camden", &["london"]),
    ("mayfair", &["london"]),
    ("fitzroy", &["melbourne"]),
    ("st kilda", &["melbourne"]),
    ("santa monica", &["los angeles"]),
    ("venice beach", &["los angeles"]),
    ("plaka", &["athens"]),
    ("zamalek", &["cairo"]),
    // ambiguous neighborhoods: all candidate parents, disambiguated late
    ("soho", &["london", "new york"]),
    ("chelsea", &["london", "new york"]),
    ("richmond", &["london", "melbourne"]),
];

fn alias_targets(key: &str) -> Option<&'static [&'static str]> {
    ALIAS_MAP
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, targets)| *targets)
}

/// Strip vague locational qualifiers from a free-text location.
///
/// Removes a leading "near / outside / around / close to / just outside /
/// Greater / about N hours|minutes|km|miles from", and a trailing
/// "area / region / vicinity / outskirts".
#[must_use]
pub fn strip_vague_qualifiers(s: &str) -> String {
    let mut text = s.trim().to_string();

    const LEADING: &[&str] = &[
        "just outside ",
        "close to ",
        "greater ",
        "near ",
        "outside ",
        "around ",
    ];
    loop {
        let lower = text.to_lowercase();
        if let Some(prefix) = LEADING.iter().find(|p| lower.starts_with(*p)) {
            text = text[prefix.len()..].trim_start().to_string();
            continue;
        }
        if let Some(rest) = strip_about_distance(&text) {
            text = rest;
            continue;
        }
        break;
    }

    const TRAILING: &[&str] = &[" area", " region", " vicinity", " outskirts"];
    loop {
        let lower = text.to_lowercase();
        if let Some(suffix) = TRAILING.iter().find(|s| lower.ends_with(*s)) {
            text = text[..text.len() - suffix.len()].trim_end().to_string();
        } else {
            break;
        }
    }

    text
}

/// Strip a leading "about N hours|minutes|km|miles from", returning the
/// remainder when the pattern is present
fn strip_about_distance(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let rest = lower.strip_prefix("about ")?;

    let mut words = rest.split_whitespace();
    let quantity = words.next()?;
    if !quantity.chars().next()?.is_ascii_digit() {
        return None;
    }
    let unit = words.next()?;
    const UNITS: &[&str] = &[
        "hour", "hours", "minute", "minutes", "min", "km", "kilometers", "mile", "miles",
    ];
    if !UNITS.contains(&unit) {
        return None;
    }
    if words.next()? != "from" {
        return None;
    }

    // Cut through the first " from ", falling back to the lowercased text
    // when case folding shifted byte positions
    let tail_start = lower.find(" from ")? + " from ".len();
    let tail = text.get(tail_start..).unwrap_or(&lower[tail_start..]);
    Some(tail.trim_start().to_string())
}

/// Lowercase, normalize apostrophes, strip punctuation, split on whitespace,
/// and drop one-character tokens and stop words
#[must_use]
pub fn tokenize(s: &str) -> Vec<String> {
    let normalized = s
        .to_lowercase()
        .replace(['\u{2019}', '\u{02bc}', '`', '´'], "'")
        .replace('\'', "");
    normalized
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Expand a token sequence with every alias resolution that applies.
///
/// The originals are retained. Lookup tries single tokens, then consecutive
/// pairs, then consecutive triples, so multi-word aliases ("notting hill")
/// resolve too. When an alias target is itself multi-word ("new york"), both
/// the combined phrase and its individual words are added so downstream
/// substring matching still fires on the single words. A token ending in the
/// Japanese ward suffix "-ku" is stripped and retried.
#[must_use]
pub fn resolve_aliases(tokens: &[String]) -> HashSet<String> {
    let mut resolved: HashSet<String> = tokens.iter().cloned().collect();

    let mut add_targets = |resolved: &mut HashSet<String>, targets: &[&str]| {
        for target in targets {
            resolved.insert((*target).to_string());
            if target.contains(' ') {
                for word in target.split_whitespace() {
                    resolved.insert(word.to_string());
                }
            }
        }
    };

    for n in 1..=3usize {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let key = window.join(" ");
            if let Some(targets) = alias_targets(&key) {
                add_targets(&mut resolved, targets);
            }
        }
    }

    for token in tokens {
        if let Some(stem) = token.strip_suffix("ku") {
            if stem.len() >= 3 {
                resolved.insert(stem.to_string());
                if let Some(targets) = alias_targets(stem) {
                    add_targets(&mut resolved, targets);
                }
            }
        }
    }

    resolved
}

/// Split a compound destination entry into independent sub-destinations.
///
/// "Lake Como, Bellagio & Tremezzo" names three candidates; each is also
/// stripped of parenthetical qualifiers ("Paris (Left Bank)" -> "Paris").
#[must_use]
pub fn split_compound_destination(s: &str) -> Vec<String> {
    s.split(['/', '&', ','])
        .map(strip_parenthetical)
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

fn strip_parenthetical(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut depth = 0usize;
    for c in part.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

enum TokenMatch {
    Exact,
    Substring,
    Miss,
}

fn match_token(token: &str, place_tokens: &HashSet<String>) -> TokenMatch {
    if place_tokens.contains(token) {
        return TokenMatch::Exact;
    }

    // The token's own alias expansions count as exact: a destination entered
    // as "NYC" matches a place filed under "New York"
    if let Some(targets) = alias_targets(token) {
        for target in targets {
            if place_tokens.contains(*target) {
                return TokenMatch::Exact;
            }
            if target.contains(' ')
                && target
                    .split_whitespace()
                    .any(|word| place_tokens.contains(word))
            {
                return TokenMatch::Exact;
            }
        }
    }

    let contained = place_tokens.iter().any(|place| {
        (token.len() >= SUBSTRING_MIN_LEN && place.contains(token))
            || (place.len() >= SUBSTRING_MIN_LEN && token.contains(place.as_str()))
    });
    if contained {
        TokenMatch::Substring
    } else {
        TokenMatch::Miss
    }
}

/// Score how well a place's free-text location names a destination.
///
/// The place location is stripped of vague qualifiers, both sides are
/// tokenized and alias-resolved, and the destination is split into
/// sub-destinations. A sub-destination matches only when every one of its
/// tokens appears in the place token set, exactly or via substring
/// containment of at least four characters in either direction. Returns
/// [`EXACT_MATCH_SCORE`] when all tokens of the best sub-destination matched
/// exactly, [`SUBSTRING_MATCH_SCORE`] when the best full match needed
/// containment, and `0.0` when no sub-destination fully matched.
#[must_use]
pub fn token_match_score(place_location: &str, destination_name: &str) -> f64 {
    let stripped = strip_vague_qualifiers(place_location);
    let place_tokens = resolve_aliases(&tokenize(&stripped));
    if place_tokens.is_empty() {
        return 0.0;
    }

    let mut best: f64 = 0.0;
    for sub_destination in split_compound_destination(destination_name) {
        let destination_tokens = tokenize(&sub_destination);
        if destination_tokens.is_empty() {
            continue;
        }

        let mut all_exact = true;
        let mut all_matched = true;
        for token in &destination_tokens {
            match match_token(token, &place_tokens) {
                TokenMatch::Exact => {}
                TokenMatch::Substring => all_exact = false,
                TokenMatch::Miss => {
                    all_matched = false;
                    break;
                }
            }
        }

        if all_matched {
            let score = if all_exact {
                EXACT_MATCH_SCORE
            } else {
                SUBSTRING_MATCH_SCORE
            };
            best = best.max(score);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("near Kyoto", "Kyoto")]
    #[case("just outside Florence", "Florence")]
    #[case("Greater Manchester", "Manchester")]
    #[case("about 2 hours from Madrid", "Madrid")]
    #[case("about 30 km from Munich", "Munich")]
    #[case("Lisbon area", "Lisbon")]
    #[case("Oslo region", "Oslo")]
    #[case("around Siena vicinity", "Siena")]
    fn test_strip_vague_qualifiers(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_vague_qualifiers(input), expected);
    }

    #[test]
    fn test_strip_about_requires_full_pattern() {
        // "about" followed by something that is not a distance stays intact
        assert_eq!(strip_vague_qualifiers("About Time Cafe"), "About Time Cafe");
    }

    #[test]
    fn test_tokenize_drops_stop_words_and_short_tokens() {
        let tokens = tokenize("the City of Porto, in Portugal");
        assert_eq!(tokens, vec!["porto", "portugal"]);
    }

    #[test]
    fn test_tokenize_normalizes_apostrophes() {
        let tokens = tokenize("King\u{2019}s Cross");
        assert_eq!(tokens, vec!["kings", "cross"]);
    }

    #[test]
    fn test_resolve_aliases_expands_abbreviation_to_phrase_and_words() {
        let resolved = resolve_aliases(&[String::from("nyc")]);
        assert!(resolved.contains("new york"));
        assert!(resolved.contains("new"));
        assert!(resolved.contains("york"));
        assert!(resolved.contains("nyc"));
    }

    #[test]
    fn test_resolve_aliases_ambiguous_neighborhood_keeps_all_parents() {
        let resolved = resolve_aliases(&[String::from("soho")]);
        assert!(resolved.contains("london"));
        assert!(resolved.contains("new york"));
    }

    #[test]
    fn test_resolve_aliases_multi_word_key() {
        let tokens = tokenize("Notting Hill");
        let resolved = resolve_aliases(&tokens);
        assert!(resolved.contains("london"));
    }

    #[test]
    fn test_resolve_aliases_ku_suffix_retry() {
        let resolved = resolve_aliases(&[String::from("shibuyaku")]);
        assert!(resolved.contains("tokyo"));
    }

    #[test]
    fn test_split_compound_destination() {
        assert_eq!(split_compound_destination("Noto / Syracuse"), vec![
            "Noto", "Syracuse"
        ]);
        assert_eq!(
            split_compound_destination("Lake Como, Bellagio & Tremezzo"),
            vec!["Lake Como", "Bellagio", "Tremezzo"]
        );
        assert_eq!(split_compound_destination("Paris (Left Bank)"), vec![
            "Paris"
        ]);
    }

    #[test]
    fn test_token_match_score_exact() {
        let score = token_match_score("Ortigia, Syracuse, Italy", "Noto / Syracuse");
        assert_eq!(score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_token_match_score_via_neighborhood_alias() {
        let score = token_match_score("Nørrebro", "Copenhagen");
        assert_eq!(score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_token_match_score_exact_inside_longer_location() {
        let score = token_match_score("Abbey Road Studios, Westminster London", "London");
        assert_eq!(score, EXACT_MATCH_SCORE);
    }

    #[test]
    fn test_token_match_score_substring_containment() {
        // "cambridgeshire" contains "cambridge" but is not an exact token
        let score = token_match_score("Ely, Cambridgeshire", "Cambridge");
        assert_eq!(score, SUBSTRING_MATCH_SCORE);
    }

    #[test]
    fn test_token_match_score_miss() {
        assert_eq!(token_match_score("Osaka, Japan", "Lisbon"), 0.0);
    }

    #[test]
    fn test_token_match_score_requires_every_destination_token() {
        // "San Gimignano" must not match a place that only mentions "San"
        assert_eq!(token_match_score("San Sebastián", "San Gimignano"), 0.0);
    }

    #[test]
    fn test_token_match_score_vague_qualifier_does_not_block() {
        let score = token_match_score("just outside Kyoto", "Kyoto");
        assert_eq!(score, EXACT_MATCH_SCORE);
    }
}
