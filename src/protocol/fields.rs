//! Record body parser
//!
//! A record body is the text between two `|` separators: a semicolon-joined
//! list where exactly one part (by convention the first) carries no `=` and
//! names the record type, and every other part is `KEY=VALUE`.

use std::collections::HashMap;

/// One parsed wire record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Record type tag (`CL`, `CT`, `EV`, `MA`, `PA`, `MG`, `CG`), empty if
    /// the body carried none
    pub tag: String,
    fields: HashMap<String, String>,
}

impl Record {
    /// Parse a record body. Never fails: junk parts are kept as opaque
    /// strings, duplicate keys keep the last value, an empty body yields an
    /// empty record. The grammar has no escape mechanism, so no unescaping
    /// happens here.
    pub fn parse(body: &str) -> Self {
        let mut record = Record::default();
        for part in body.split(';') {
            if part.is_empty() {
                continue;
            }
            match part.split_once('=') {
                Some((key, value)) => {
                    record.fields.insert(key.to_string(), value.to_string());
                }
                None => record.tag = part.to_string(),
            }
        }
        record
    }

    /// Field value, if the key was present on the wire
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field value, empty string when absent
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// True when the body carried neither a type tag nor any field
    pub fn is_empty(&self) -> bool {
        self.tag.is_empty() && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_and_fields() {
        let rec = Record::parse("EV;ID=190321250C13A_32_0;NA=A v B;SS=3-6,0-0;");
        assert_eq!(rec.tag, "EV");
        assert_eq!(rec.get("ID"), Some("190321250C13A_32_0"));
        assert_eq!(rec.get("NA"), Some("A v B"));
        assert_eq!(rec.get("SS"), Some("3-6,0-0"));
        assert_eq!(rec.get("OI"), None);
    }

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let rec = Record::parse("PA;OD=9/2;NA=Over=2.5;");
        assert_eq!(rec.get("NA"), Some("Over=2.5"));
        assert_eq!(rec.get("OD"), Some("9/2"));
    }

    #[test]
    fn duplicate_keys_later_wins() {
        let rec = Record::parse("EV;SS=1-0;SS=2-0;");
        assert_eq!(rec.get("SS"), Some("2-0"));
    }

    #[test]
    fn empty_body_yields_empty_record() {
        let rec = Record::parse("");
        assert!(rec.is_empty());
        assert_eq!(rec.tag, "");
    }

    #[test]
    fn bare_fields_without_tag() {
        // incremental sub-messages carry fields only
        let rec = Record::parse("PI=0,1;XP=0-0;SS=3-6,1-0;");
        assert_eq!(rec.tag, "");
        assert_eq!(rec.get("PI"), Some("0,1"));
        assert!(!rec.is_empty());
    }

    #[test]
    fn empty_value_is_present() {
        let rec = Record::parse("EV;ES=;");
        assert_eq!(rec.get("ES"), Some(""));
    }
}
