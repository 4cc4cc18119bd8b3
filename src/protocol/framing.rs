//! Transport frame splitter
//!
//! A raw payload packs several sub-messages behind control bytes: 0x15 (and
//! the alternate 0x14) open a sub-message, 0x08 separates them, 0x01 prefixes
//! the action letter of a topic, and stray NULs appear under load. Each
//! sub-message is `TOPIC|RECORD|RECORD|…`.

use regex::Regex;
use std::sync::LazyLock;

const START_A: u8 = 0x15; // NAK
const START_B: u8 = 0x14; // DC4
const ACTION_PREFIX: u8 = 0x01; // SOH
const SUB_SEPARATOR: u8 = 0x08; // BS
// internal separator the two start bytes collapse into
const INTERNAL_SEP: char = '\u{1e}';

// Topic suffix patterns share the opaque `_32` platform version with
// `item_id`; keep them next to each other when the platform bumps.
static RE_TOPIC_ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_32(_0)?[FUD]$").unwrap());
static RE_TOPIC_EMPTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^EMPTY[FUD]$").unwrap());

/// One sub-message: a topic header plus the record bodies that followed it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubMessage {
    pub topic: String,
    pub parts: Vec<String>,
}

/// Split one transport payload into sub-messages.
///
/// Control bytes are normalized first; when the payload carried none (test
/// fixtures, archived logs), the single resulting piece is re-grouped by
/// recognizing topic headers among its `|`-separated parts. The two paths
/// never run together: header detection only triggers on control-byte-free
/// input.
pub fn split_payload(raw: &[u8]) -> Vec<SubMessage> {
    let mut normalized = Vec::with_capacity(raw.len());
    for &byte in raw {
        match byte {
            START_A | START_B => normalized.push(INTERNAL_SEP as u8),
            0x00 | ACTION_PREFIX | SUB_SEPARATOR => {}
            _ => normalized.push(byte),
        }
    }

    let text = String::from_utf8_lossy(&normalized);
    let pieces: Vec<&str> = text.split(INTERNAL_SEP).filter(|p| !p.is_empty()).collect();

    match pieces.as_slice() {
        [] => Vec::new(),
        [single] => regroup_by_headers(single),
        many => many.iter().map(|piece| to_submessage(piece)).collect(),
    }
}

/// Whether a header names a topic the state machine should skip outright
pub fn is_noise_topic(topic: &str) -> bool {
    topic == "__time"
        || topic.starts_with('#')
        || topic
            .get(..5)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("EMPTY"))
}

fn to_submessage(piece: &str) -> SubMessage {
    let mut parts = piece.split('|');
    let topic = parts.next().unwrap_or("").to_string();
    SubMessage {
        topic,
        parts: parts.map(str::to_string).collect(),
    }
}

/// A part is a topic header iff it carries an action suffix on the platform
/// version, is an `EMPTY` marker, the `__time` tick, or a `#`-prefixed
/// diagnostic topic.
fn is_topic_header(part: &str) -> bool {
    RE_TOPIC_ACTION.is_match(part)
        || RE_TOPIC_EMPTY.is_match(part)
        || part == "__time"
        || part.starts_with('#')
}

fn regroup_by_headers(piece: &str) -> Vec<SubMessage> {
    let mut subs: Vec<SubMessage> = Vec::new();
    for part in piece.split('|') {
        if is_topic_header(part) {
            subs.push(SubMessage {
                topic: part.to_string(),
                parts: Vec::new(),
            });
        } else if let Some(current) = subs.last_mut() {
            current.parts.push(part.to_string());
        }
        // parts before the first recognized header have no home and drop
    }
    subs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_bytes_delimit_submessages() {
        let raw = b"\x15OVInPlay_32_0F|CL;CL=13;|\x08\x15OV190321250C13A_32_0U|SS=1-0;|";
        let subs = split_payload(raw);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].topic, "OVInPlay_32_0F");
        assert_eq!(subs[0].parts, vec!["CL;CL=13;", ""]);
        assert_eq!(subs[1].topic, "OV190321250C13A_32_0U");
    }

    #[test]
    fn soh_before_action_letter_is_stripped() {
        let raw = b"\x15OVInPlay_32_0\x01F|EV;ID=1C13A;|";
        let subs = split_payload(raw);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].topic, "OVInPlay_32_0F");
    }

    #[test]
    fn nul_bytes_are_dropped() {
        let raw = b"\x15OV1C13A_32_0U|SS=\x001-0;|";
        let subs = split_payload(raw);
        assert_eq!(subs[0].parts[0], "SS=1-0;");
    }

    #[test]
    fn clean_input_falls_back_to_header_detection() {
        let raw = b"OVInPlay_32_0F|CL;CL=13;|EV;ID=1C13A;|OV190321250C13A_32_0U|SS=1-0;|";
        let subs = split_payload(raw);
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].topic, "OVInPlay_32_0F");
        assert_eq!(subs[0].parts, vec!["CL;CL=13;", "EV;ID=1C13A;"]);
        assert_eq!(subs[1].topic, "OV190321250C13A_32_0U");
        assert_eq!(subs[1].parts, vec!["SS=1-0;", ""]);
    }

    #[test]
    fn fallback_recognizes_special_headers() {
        let raw = b"__time|U=123;|EMPTYU|#P__time,xx|OVInPlay_32_0D|";
        let subs = split_payload(raw);
        let topics: Vec<&str> = subs.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec!["__time", "EMPTYU", "#P__time,xx", "OVInPlay_32_0D"]
        );
        assert_eq!(subs[0].parts, vec!["U=123;"]);
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert!(split_payload(b"").is_empty());
        assert!(split_payload(b"\x15\x15\x08").is_empty());
    }

    #[test]
    fn noise_topics() {
        assert!(is_noise_topic("__time"));
        assert!(is_noise_topic("#P__time,s"));
        assert!(is_noise_topic("EMPTY U"));
        assert!(is_noise_topic("empty f"));
        assert!(!is_noise_topic("OVInPlay_32_0F"));
    }
}
