//! Static sport registry
//!
//! Maps wire sport codes to capability descriptors. Presence of a code marks
//! the sport as supported; everything else is dropped by the state manager
//! at the earliest opportunity.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Capability descriptor for one sport
#[derive(Debug, Clone, Copy)]
pub struct SportConfig {
    /// Wire sport code (`CL` field)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// URL/archive folder slug
    pub folder: &'static str,
    /// Name separators tried, in order, when splitting a fixture name
    pub separators: &'static [&'static str],
    /// Score string is a comma-separated list of per-set games
    pub set_scoring: bool,
    /// Feed carries a serving indicator (`PI`)
    pub has_serving: bool,
    /// Feed carries a within-game point score (`XP`)
    pub has_point_score: bool,
}

/// Separators tried when the sport has none of its own, or none of its own
/// matched the fixture name
pub const FALLBACK_SEPARATORS: &[&str] = &[" v ", " vs ", " @ "];

const SPORTS: &[SportConfig] = &[
    SportConfig {
        id: "1",
        name: "Soccer",
        folder: "soccer",
        separators: &[" v ", " vs "],
        set_scoring: false,
        has_serving: false,
        has_point_score: false,
    },
    SportConfig {
        id: "12",
        name: "Football",
        folder: "american-football",
        separators: &[" @ ", " v "],
        set_scoring: false,
        has_serving: false,
        has_point_score: false,
    },
    SportConfig {
        id: "13",
        name: "Tennis",
        folder: "tennis",
        separators: &[" v "],
        set_scoring: true,
        has_serving: true,
        has_point_score: true,
    },
    SportConfig {
        id: "14",
        name: "Snooker",
        folder: "snooker",
        separators: &[" v "],
        set_scoring: true,
        has_serving: false,
        has_point_score: false,
    },
    SportConfig {
        id: "17",
        name: "Hockey",
        folder: "hockey",
        separators: &[" @ ", " v ", " vs "],
        set_scoring: false,
        has_serving: false,
        has_point_score: false,
    },
    SportConfig {
        id: "18",
        name: "Basketball",
        folder: "basketball",
        separators: &[" @ ", " vs ", " v "],
        set_scoring: false,
        has_serving: false,
        has_point_score: false,
    },
    SportConfig {
        id: "92",
        name: "Table Tennis",
        folder: "table-tennis",
        separators: &[" v "],
        set_scoring: true,
        has_serving: true,
        has_point_score: true,
    },
];

static REGISTRY: LazyLock<HashMap<&'static str, &'static SportConfig>> =
    LazyLock::new(|| SPORTS.iter().map(|s| (s.id, s)).collect());

/// Look up a sport by its wire code
pub fn sport(id: &str) -> Option<&'static SportConfig> {
    REGISTRY.get(id).copied()
}

/// Whether a wire sport code is in the registry
pub fn is_supported(id: &str) -> bool {
    REGISTRY.contains_key(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tennis_capabilities() {
        let tennis = sport("13").unwrap();
        assert_eq!(tennis.name, "Tennis");
        assert!(tennis.set_scoring);
        assert!(tennis.has_serving);
        assert!(tennis.has_point_score);
    }

    #[test]
    fn soccer_is_plain_scored() {
        let soccer = sport("1").unwrap();
        assert!(!soccer.set_scoring);
        assert!(!soccer.has_serving);
        assert!(!soccer.has_point_score);
    }

    #[test]
    fn unknown_codes_are_unsupported() {
        assert!(!is_supported("999"));
        assert!(!is_supported(""));
        assert!(is_supported("92"));
    }
}
