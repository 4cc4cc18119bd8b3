//! Property-based tests for the wire decoder
//!
//! Uses proptest to verify invariants that should hold for all inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;

use odds_feed::protocol::{
    fractional_to_decimal, parse_point_score, parse_serving, parse_set_scores,
    serialize_set_scores,
};
use odds_feed::state::StateManager;
use odds_feed::MatchStatus;

proptest! {
    /// Parsing a re-serialized set list is a fixed point
    #[test]
    fn set_scores_parse_is_idempotent(sets in prop::collection::vec((0u32..99, 0u32..99), 0..8)) {
        let wire = serialize_set_scores(&sets);
        let parsed = parse_set_scores(&wire);
        prop_assert_eq!(&parsed, &sets);
        prop_assert_eq!(parse_set_scores(&serialize_set_scores(&parsed)), parsed);
    }

    /// Arbitrary text never panics the scalar parsers
    #[test]
    fn scalar_parsers_tolerate_junk(raw in ".{0,40}") {
        parse_set_scores(&raw);
        parse_point_score(&raw);
        parse_serving(&raw);
        fractional_to_decimal(&raw);
    }

    /// Fractional odds convert exactly: n/d + 1
    #[test]
    fn fractional_odds_are_exact(n in 1i64..100_000, d in 1i64..10_000) {
        let odds = format!("{n}/{d}");
        let expected = Decimal::from(n) / Decimal::from(d) + Decimal::ONE;
        prop_assert_eq!(fractional_to_decimal(&odds), expected);
    }

    /// Zero denominators always coerce to zero decimal odds
    #[test]
    fn zero_denominator_is_zero(n in 0i64..100_000) {
        prop_assert_eq!(fractional_to_decimal(&format!("{n}/0")), Decimal::ZERO);
    }

    /// The decoder never panics on arbitrary payload bytes
    #[test]
    fn process_tolerates_arbitrary_bytes(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut state = StateManager::new();
        state.process(&payload);
    }
}

/// Strategy for small synthetic delta sub-messages against one known world
fn delta_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..9, 0u32..9).prop_map(|(a, b)| format!(
            "OV190321250C13A_32_0U|SS=3-6,{a}-{b};|"
        )),
        prop_oneof![Just("0-0"), Just("15-0"), Just("30-15"), Just("40-A")]
            .prop_map(|g| format!("OV190321250C13A_32_0U|XP={g};|")),
        prop_oneof![Just("1,0"), Just("0,1")]
            .prop_map(|pi| format!("OV190321250C13A_32_0U|PI={pi};|")),
        (1i64..20, 1i64..10).prop_map(|(n, d)| format!(
            "OV190340113-701873422_32_0U|OD={n}/{d};|"
        )),
        (1i64..20, 1i64..10).prop_map(|(n, d)| format!(
            "OV190340113-701873420_32_0U|OD={n}/{d};SU=0;|"
        )),
    ]
}

const BASE_DUMP: &str = "OVInPlay_32_0F\
    |CL;CL=13;NA=Tennis;\
    |CT;NA=ATP Santiago;CC=21124106;\
    |EV;ID=190321250C13A_32_0;NA=Mariano Navone v Luciano Darderi;OI=190340113;SS=3-6,0-0;XP=40-15;PI=1,0;ES=2;CL=13;\
    |MA;ID=1763;NA=Money Line;SU=0;\
    |PA;ID=701873422;FI=190340113;OD=9/2;OR=0;SU=0;\
    |PA;ID=701873420;FI=190340113;OD=1/7;OR=1;SU=0;|";

fn world(state: &StateManager) -> serde_json::Value {
    let mut matches = state.all_matches();
    matches.sort_by(|a, b| a.event_id.cmp(&b.event_id));
    serde_json::to_value(matches).unwrap()
}

proptest! {
    /// One payload carrying N deltas ends in the same state as N payloads
    #[test]
    fn concatenation_is_associative(deltas in prop::collection::vec(delta_strategy(), 1..12)) {
        let mut sequential = StateManager::new();
        sequential.process(BASE_DUMP.as_bytes());
        let mut sequential_changes = Vec::new();
        for delta in &deltas {
            for update in sequential.process(delta.as_bytes()) {
                sequential_changes.extend(update.changes);
            }
        }

        let mut combined = StateManager::new();
        combined.process(BASE_DUMP.as_bytes());
        let mut combined_changes = Vec::new();
        for update in combined.process(deltas.concat().as_bytes()) {
            combined_changes.extend(update.changes);
        }

        prop_assert_eq!(sequential_changes, combined_changes);
        prop_assert_eq!(world(&sequential), world(&combined));
    }

    /// A global dump leaves exactly the dumped events behind, no matter what
    /// state preceded it
    #[test]
    fn global_dump_is_a_reset(preceding in prop::collection::vec(delta_strategy(), 0..6)) {
        let mut state = StateManager::new();
        state.process(BASE_DUMP.as_bytes());
        for delta in &preceding {
            state.process(delta.as_bytes());
        }

        let replacement = "OVInPlay_32_0F\
            |CL;CL=1;NA=Soccer;\
            |EV;ID=701C1A_32_0;NA=Ajax v PSV;OI=861;ES=2;|";
        state.process(replacement.as_bytes());

        let matches = state.all_matches();
        prop_assert_eq!(matches.len(), 1);
        prop_assert_eq!(matches[0].event_id.as_str(), "701");
        prop_assert_eq!(matches[0].status, MatchStatus::InPlay);
        prop_assert!(state.event_for_fixture("190340113").is_none());
    }
}
