//! County-equivalent labels, e.g. "Orleans Parish, La.".

use super::ap_state;

/// Suffix used when a state has no county-equivalent override
pub const DEFAULT_SUFFIX: &str = "County";

/// Census Bureau county-equivalent terms, keyed by state FIPS code.
/// Alaska census areas usually already carry "Census Area" in their name.
const STATE_SUFFIX: &[(&str, &str)] = &[("02", "Borough"), ("22", "Parish"), ("72", "Municipio")];

/// Names ending in one of these are already suffixed.
pub const SUFFIXES: &[&str] = &[
    "County",
    "Parish",
    "Borough",
    "Census Area",
    "Municipio",
    "Municipality",
];

/// True if `name` already ends with a subdivision suffix.
///
/// This is a plain trailing-substring test, so a name that merely ends in
/// one of the terms counts as suffixed.
pub fn has_suffix(name: &str) -> bool {
    let name = name.trim();
    SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Suffix for a GEOID, chosen by its first two characters.
pub fn suffix_for_state(geoid: &str) -> &'static str {
    geoid
        .get(..2)
        .and_then(|fips| STATE_SUFFIX.iter().find(|(code, _)| *code == fips))
        .map(|(_, suffix)| *suffix)
        .unwrap_or(DEFAULT_SUFFIX)
}

/// Format a county name with its county-equivalent suffix and AP style state.
///
/// ```
/// use cwsbounds::naming::county_label;
///
/// assert_eq!(county_label("22071", "Orleans", "LA"), "Orleans Parish, La.");
/// assert_eq!(county_label("06037", "Los Angeles", "CA"), "Los Angeles County, Calif.");
/// ```
pub fn county_label(geoid: &str, name: &str, state: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return String::new();
    }

    let base = if has_suffix(name) {
        name.to_string()
    } else {
        format!("{} {}", name, suffix_for_state(geoid))
    };

    let state = ap_state(state);
    if state.is_empty() {
        base
    } else {
        format!("{}, {}", base, state)
    }
}
