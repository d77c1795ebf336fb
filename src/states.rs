//! # U.S. State Lookup
//!
//! Fixed mapping between full state names and their two-letter postal codes.
//! Covers the 50 states plus the District of Columbia, spelled the way the
//! job-posting exports spell them ("Washington, D.C.").

use serde::{Deserialize, Serialize};
use std::fmt;

/// A U.S. state (or D.C.) with its postal code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Full name as it appears in the source tables
    pub name: &'static str,
    /// Two-letter postal code
    pub code: &'static str,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

const fn state(name: &'static str, code: &'static str) -> State {
    State { name, code }
}

/// All 50 states plus D.C., alphabetical by name
pub const STATES: [State; 51] = [
    state("Alabama", "AL"),
    state("Alaska", "AK"),
    state("Arizona", "AZ"),
    state("Arkansas", "AR"),
    state("California", "CA"),
    state("Colorado", "CO"),
    state("Connecticut", "CT"),
    state("Delaware", "DE"),
    state("Florida", "FL"),
    state("Georgia", "GA"),
    state("Hawaii", "HI"),
    state("Idaho", "ID"),
    state("Illinois", "IL"),
    state("Indiana", "IN"),
    state("Iowa", "IA"),
    state("Kansas", "KS"),
    state("Kentucky", "KY"),
    state("Louisiana", "LA"),
    state("Maine", "ME"),
    state("Maryland", "MD"),
    state("Massachusetts", "MA"),
    state("Michigan", "MI"),
    state("Minnesota", "MN"),
    state("Mississippi", "MS"),
    state("Missouri", "MO"),
    state("Montana", "MT"),
    state("Nebraska", "NE"),
    state("Nevada", "NV"),
    state("New Hampshire", "NH"),
    state("New Jersey", "NJ"),
    state("New Mexico", "NM"),
    state("New York", "NY"),
    state("North Carolina", "NC"),
    state("North Dakota", "ND"),
    state("Ohio", "OH"),
    state("Oklahoma", "OK"),
    state("Oregon", "OR"),
    state("Pennsylvania", "PA"),
    state("Rhode Island", "RI"),
    state("South Carolina", "SC"),
    state("South Dakota", "SD"),
    state("Tennessee", "TN"),
    state("Texas", "TX"),
    state("Utah", "UT"),
    state("Vermont", "VT"),
    state("Virginia", "VA"),
    state("Washington", "WA"),
    state("West Virginia", "WV"),
    state("Wisconsin", "WI"),
    state("Wyoming", "WY"),
    state("Washington, D.C.", "DC"),
];

/// Look up a state by its full name (exact, after trimming)
pub fn by_name(name: &str) -> Option<&'static State> {
    let name = name.trim();
    STATES.iter().find(|s| s.name == name)
}

/// Look up a state by postal code (case-insensitive)
pub fn by_code(code: &str) -> Option<&'static State> {
    let code = code.trim();
    STATES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// Postal code for a full state name
pub fn code_for(name: &str) -> Option<&'static str> {
    by_name(name).map(|s| s.code)
}

/// Resolve user input that may be either a code or a full name into a code.
///
/// Unknown input is returned trimmed, so entities outside the lookup table
/// (which the loader keeps under their own name) remain addressable.
pub fn resolve(input: &str) -> String {
    if let Some(s) = by_code(input) {
        return s.code.to_string();
    }
    match by_name(input) {
        Some(s) => s.code.to_string(),
        None => input.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_is_complete_and_unique() {
        let codes: HashSet<_> = STATES.iter().map(|s| s.code).collect();
        let names: HashSet<_> = STATES.iter().map(|s| s.name).collect();
        assert_eq!(codes.len(), 51);
        assert_eq!(names.len(), 51);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(code_for("California"), Some("CA"));
        assert_eq!(code_for("  Tennessee "), Some("TN"));
        assert_eq!(code_for("Washington, D.C."), Some("DC"));
        assert_eq!(code_for("Puerto Rico"), None);
        assert_eq!(by_code("ny").map(|s| s.name), Some("New York"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("tn"), "TN");
        assert_eq!(resolve("New Mexico"), "NM");
        assert_eq!(resolve(" Guam "), "Guam");
    }
}
