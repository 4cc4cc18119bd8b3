//! Item identifier parser
//!
//! Entity identifiers come in three shapes, all sharing an `OV`/`6V` prefix
//! and a trailing platform-version suffix (`_32` / `_32_0`, possibly with an
//! action letter glued on). Numeric components stay as strings: the feed
//! emits IDs wider than anything a double-precision consumer could hold, and
//! the grammar is string-native anyway.

use regex::Regex;
use std::sync::LazyLock;

// The `_32` platform suffix is opaque versioning. All patterns that depend on
// it live in this module and in `framing`, so a platform bump is a two-site
// amendment.
static RE_PLATFORM_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_32(_0)?[UDF]?$").unwrap());
static RE_EVENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:OV|6V)(\d+)C(\d+)A$").unwrap());
static RE_MARKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:OV|6V)(\d+)C(\d+)-(\d+)$").unwrap());
static RE_SELECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:OV|6VP?|OVES)(\d+)-0?(\d+)$").unwrap());
static RE_EVENT_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:OV|6V)?(\d+)C").unwrap());

/// A classified entity identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemId {
    Event {
        event_id: String,
        category_id: String,
    },
    Market {
        event_id: String,
        category_id: String,
        market_num: String,
    },
    Selection {
        fixture_id: String,
        selection_id: String,
    },
    Unknown,
}

impl ItemId {
    /// Classify an identifier, tolerating a still-attached platform suffix.
    /// A leading zero on the selection component is discarded.
    pub fn parse(raw: &str) -> ItemId {
        let core = RE_PLATFORM_SUFFIX.replace(raw, "");

        if let Some(caps) = RE_EVENT.captures(&core) {
            return ItemId::Event {
                event_id: caps[1].to_string(),
                category_id: caps[2].to_string(),
            };
        }
        if let Some(caps) = RE_MARKET.captures(&core) {
            return ItemId::Market {
                event_id: caps[1].to_string(),
                category_id: caps[2].to_string(),
                market_num: caps[3].to_string(),
            };
        }
        if let Some(caps) = RE_SELECTION.captures(&core) {
            return ItemId::Selection {
                fixture_id: caps[1].to_string(),
                selection_id: caps[2].to_string(),
            };
        }
        ItemId::Unknown
    }
}

/// Pull the event id out of an `EV` record's `ID` field
/// (`190321250C13A_32_0` → `190321250`).
pub fn event_id_of(raw: &str) -> Option<String> {
    RE_EVENT_KEY.captures(raw).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_event_ids() {
        assert_eq!(
            ItemId::parse("OV190321250C13A_32_0"),
            ItemId::Event {
                event_id: "190321250".into(),
                category_id: "13".into(),
            }
        );
        assert_eq!(
            ItemId::parse("6V177251109C1A_32"),
            ItemId::Event {
                event_id: "177251109".into(),
                category_id: "1".into(),
            }
        );
    }

    #[test]
    fn strips_action_letter_with_suffix() {
        assert_eq!(
            ItemId::parse("OV190321250C13A_32_0U"),
            ItemId::Event {
                event_id: "190321250".into(),
                category_id: "13".into(),
            }
        );
    }

    #[test]
    fn classifies_market_ids() {
        assert_eq!(
            ItemId::parse("OV190321250C13-1763_32_0"),
            ItemId::Market {
                event_id: "190321250".into(),
                category_id: "13".into(),
                market_num: "1763".into(),
            }
        );
    }

    #[test]
    fn classifies_selection_ids() {
        assert_eq!(
            ItemId::parse("OV190340113-701873422_32_0"),
            ItemId::Selection {
                fixture_id: "190340113".into(),
                selection_id: "701873422".into(),
            }
        );
        // esoteric prefixes and a discarded leading zero
        assert_eq!(
            ItemId::parse("OVES190340113-0701873422"),
            ItemId::Selection {
                fixture_id: "190340113".into(),
                selection_id: "701873422".into(),
            }
        );
        assert_eq!(
            ItemId::parse("6VP190340113-701873422"),
            ItemId::Selection {
                fixture_id: "190340113".into(),
                selection_id: "701873422".into(),
            }
        );
    }

    #[test]
    fn junk_is_unknown() {
        assert_eq!(ItemId::parse("OVInPlay_32_0"), ItemId::Unknown);
        assert_eq!(ItemId::parse("__time"), ItemId::Unknown);
        assert_eq!(ItemId::parse(""), ItemId::Unknown);
        assert_eq!(ItemId::parse("XX123C4A"), ItemId::Unknown);
    }

    #[test]
    fn event_key_extraction() {
        assert_eq!(event_id_of("190321250C13A_32_0"), Some("190321250".into()));
        assert_eq!(event_id_of("OV190321250C13A"), Some("190321250".into()));
        assert_eq!(event_id_of("no-digits-here"), None);
    }
}
