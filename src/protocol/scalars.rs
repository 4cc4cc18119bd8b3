//! Scalar value parsers
//!
//! Small lossy decoders for the score, serving, and odds notations. All of
//! them coerce junk instead of failing: a malformed integer reads as 0, a
//! malformed fraction as zero decimal odds, a missing score half as "0".

use rust_decimal::Decimal;

use crate::sports::{SportConfig, FALLBACK_SEPARATORS};

/// Parse a set-score list: `"3-6,1-0"` → `[(3, 6), (1, 0)]`
pub fn parse_set_scores(raw: &str) -> Vec<(u32, u32)> {
    raw.split(',')
        .filter(|set| !set.is_empty())
        .map(|set| {
            let (left, right) = set.split_once('-').unwrap_or((set, ""));
            (
                left.trim().parse().unwrap_or(0),
                right.trim().parse().unwrap_or(0),
            )
        })
        .collect()
}

/// Render a set-score list back to wire shape
pub fn serialize_set_scores(sets: &[(u32, u32)]) -> String {
    sets.iter()
        .map(|(p1, p2)| format!("{p1}-{p2}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a within-game point score: `"40-15"` → `("40", "15")`.
///
/// Values are free strings (`0`, `15`, `30`, `40`, `A`); missing halves
/// default to `"0"`.
pub fn parse_point_score(raw: &str) -> (String, String) {
    let (left, right) = raw.split_once('-').unwrap_or((raw, ""));
    let coerce = |half: &str| {
        if half.is_empty() {
            "0".to_string()
        } else {
            half.to_string()
        }
    };
    (coerce(left), coerce(right))
}

/// Decode the serving indicator (`PI`): a leading `1` digit marks player 2
/// as serving, anything else (including an empty field) player 1.
pub fn parse_serving(raw: &str) -> u8 {
    if raw.starts_with('1') {
        2
    } else {
        1
    }
}

/// Fractional odds to decimal odds: `"n/d"` → `n/d + 1`.
///
/// Zero denominators, missing slashes, and unparseable components all read
/// as zero decimal odds.
pub fn fractional_to_decimal(odds: &str) -> Decimal {
    let Some((numerator, denominator)) = odds.split_once('/') else {
        return Decimal::ZERO;
    };
    let (Ok(n), Ok(d)) = (
        numerator.trim().parse::<i64>(),
        denominator.trim().parse::<i64>(),
    ) else {
        return Decimal::ZERO;
    };
    if d == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(n) / Decimal::from(d) + Decimal::ONE
}

/// Split a fixture name into the two team/player names, trying the sport's
/// own separators first and the generic list second. An unsplittable name
/// lands whole in the first slot.
pub fn split_teams(name: &str, sport: &SportConfig) -> (String, String) {
    for separator in sport.separators.iter().chain(FALLBACK_SEPARATORS) {
        if let Some((left, right)) = name.split_once(separator) {
            return (left.trim().to_string(), right.trim().to_string());
        }
    }
    (name.to_string(), String::new())
}
