//! Live-state engine
//!
//! The sole entry point is [`StateManager::process`]: bytes of one transport
//! payload in, ordered change events out. Full dumps rebuild state and emit
//! nothing; deltas mutate it and describe what moved. Nothing in here blocks,
//! suspends, or fails — a malformed record is dropped or coerced, never a
//! reason to reject the rest of the frame.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::protocol::{
    event_id_of, fractional_to_decimal, is_noise_topic, parse_point_score, parse_serving,
    parse_set_scores, serialize_set_scores, split_payload, split_teams, ItemId, Record, SubMessage,
};
use crate::sports;

use super::{Market, Match, MatchStatus, MatchUpdate, Selection, SelectionRef, UpdateKind};

/// Parse context threaded through one full-dump walk. Wire order is the only
/// containment there is: CL opens a sport section, CT a tournament, EV an
/// event, MA a market that subsequent PA records populate.
#[derive(Debug, Default)]
struct DumpContext {
    sport_id: String,
    supported: bool,
    tournament: String,
    tournament_code: String,
    category: String,
    last_event_id: String,
}

/// Owns the match table and its reverse indexes
#[derive(Debug, Default)]
pub struct StateManager {
    matches: HashMap<String, Match>,
    fixture_to_event: HashMap<String, String>,
    item_to_event: HashMap<String, String>,
    selection_refs: HashMap<String, SelectionRef>,
}

impl StateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transport payload, returning the change events it produced
    /// in wire order. Full-dump sub-messages never produce events.
    pub fn process(&mut self, payload: &[u8]) -> Vec<MatchUpdate> {
        let mut updates = Vec::new();
        for sub in split_payload(payload) {
            self.apply_submessage(&sub, &mut updates);
        }
        updates
    }

    fn apply_submessage(&mut self, sub: &SubMessage, out: &mut Vec<MatchUpdate>) {
        let topic = sub.topic.as_str();
        if is_noise_topic(topic) {
            trace!(topic, "skipping noise topic");
            return;
        }
        match topic.chars().last() {
            Some('F') => self.apply_full_dump(topic, &sub.parts),
            Some(action @ ('U' | 'I' | 'D')) => self.apply_delta(topic, action, &sub.parts, out),
            _ => trace!(topic, "topic without an action suffix, skipping"),
        }
    }

    // ---- full dumps -----------------------------------------------------

    fn apply_full_dump(&mut self, topic: &str, parts: &[String]) {
        // a dump covering the whole in-play tree replaces the world; a
        // detail subscription merges into it
        let global = topic.contains("InPlay");
        if global {
            self.matches.clear();
            self.fixture_to_event.clear();
            self.item_to_event.clear();
            self.selection_refs.clear();
        }

        let mut ctx = DumpContext::default();
        for part in parts {
            let record = Record::parse(part);
            if record.is_empty() {
                continue;
            }
            match record.tag.as_str() {
                "CL" => {
                    ctx.sport_id = record.get_or_empty("CL").to_string();
                    ctx.supported = sports::is_supported(&ctx.sport_id);
                    if !ctx.supported {
                        trace!(sport = %ctx.sport_id, "entering unsupported sport section");
                    }
                }
                "CT" if ctx.supported => {
                    ctx.tournament = record.get_or_empty("NA").to_string();
                    ctx.tournament_code = record
                        .get("CC")
                        .or_else(|| record.get("ID"))
                        .unwrap_or("")
                        .to_string();
                    ctx.category = record.get_or_empty("L3").to_string();
                }
                "CT" => {}
                "EV" => self.apply_event_record(&record, &mut ctx),
                "MA" => self.apply_market_record(&record, &ctx),
                "PA" => self.apply_selection_record(&record, &ctx),
                other => trace!(tag = other, "ignoring record type"),
            }
        }
        debug!(topic, global, matches = self.matches.len(), "full dump applied");
    }

    fn apply_event_record(&mut self, record: &Record, ctx: &mut DumpContext) {
        // detail subscriptions carry the sport on the EV itself
        if let Some(code) = record.get("CL") {
            if sports::is_supported(code) {
                ctx.sport_id = code.to_string();
                ctx.supported = true;
            }
        }
        if !ctx.supported {
            // the skipped event still terminates any open market containment
            ctx.last_event_id.clear();
            trace!(sport = %ctx.sport_id, "dropping event in unsupported sport");
            return;
        }
        let Some(config) = sports::sport(&ctx.sport_id) else {
            ctx.last_event_id.clear();
            return;
        };

        let item_id = record.get_or_empty("ID");
        let Some(event_id) = event_id_of(item_id) else {
            ctx.last_event_id.clear();
            trace!(id = item_id, "EV record without a parseable event id");
            return;
        };

        let name = record.get_or_empty("NA").to_string();
        let (team1, team2) = split_teams(&name, config);
        let fixture_id = record.get_or_empty("OI").to_string();
        let status_raw = record.get_or_empty("ES").to_string();
        let score_raw = record.get_or_empty("SS").to_string();

        let tournament = match record.get("CT") {
            Some(ct) if !ct.is_empty() => ct.to_string(),
            _ => ctx.tournament.clone(),
        };
        let tournament_code = match record.get("CC") {
            Some(cc) if !cc.is_empty() => cc.to_string(),
            _ => ctx.tournament_code.clone(),
        };

        trace!(
            event_id = %event_id,
            sport = config.name,
            tournament = %tournament,
            category = %ctx.category,
            "registering match"
        );

        let m = Match {
            event_id: event_id.clone(),
            fixture_id: fixture_id.clone(),
            item_id: item_id.to_string(),
            name,
            sport_id: config.id.to_string(),
            sport_name: config.name.to_string(),
            team1,
            team2,
            tournament,
            tournament_code,
            status: if status_raw.is_empty() {
                MatchStatus::PreMatch
            } else {
                MatchStatus::InPlay
            },
            status_raw,
            sets: if config.set_scoring {
                parse_set_scores(&score_raw)
            } else {
                Vec::new()
            },
            current_game: if config.has_point_score {
                parse_point_score(record.get_or_empty("XP"))
            } else {
                ("0".to_string(), "0".to_string())
            },
            serving: if config.has_serving {
                parse_serving(record.get_or_empty("PI"))
            } else {
                0
            },
            score_raw,
            last_updated: record.get_or_empty("TU").to_string(),
            kick_off: record.get_or_empty("ST").parse().unwrap_or(0),
            markets: Vec::new(),
        };

        if !fixture_id.is_empty() {
            self.fixture_to_event.insert(fixture_id, event_id.clone());
        }
        self.item_to_event.insert(item_id.to_string(), event_id.clone());
        self.matches.insert(event_id.clone(), m);
        ctx.last_event_id = event_id;
    }

    fn apply_market_record(&mut self, record: &Record, ctx: &DumpContext) {
        let Some(m) = self.matches.get_mut(&ctx.last_event_id) else {
            trace!("market record outside an event, dropping");
            return;
        };
        let market_id = record.get("MA").or_else(|| record.get("ID")).unwrap_or("");
        if market_id.is_empty() {
            trace!(event_id = %m.event_id, "market record without an id, dropping");
            return;
        }
        m.markets.push(Market {
            id: market_id.to_string(),
            name: record.get_or_empty("NA").to_string(),
            suspended: record.get("SU") == Some("1"),
            selections: Vec::new(),
        });
    }

    fn apply_selection_record(&mut self, record: &Record, ctx: &DumpContext) {
        let Some(m) = self.matches.get_mut(&ctx.last_event_id) else {
            trace!("selection record outside an event, dropping");
            return;
        };
        let Some(market) = m.markets.last_mut() else {
            trace!(event_id = %m.event_id, "selection record before any market, dropping");
            return;
        };
        let id = record.get_or_empty("ID").to_string();
        let odds = record.get_or_empty("OD").to_string();
        let position = record.get_or_empty("OR").parse().unwrap_or(0);
        market.selections.push(Selection {
            id: id.clone(),
            odds_decimal: fractional_to_decimal(&odds),
            odds,
            position,
            suspended: record.get("SU") == Some("1"),
        });
        if let Some(fixture_id) = record.get("FI").filter(|fi| !fi.is_empty()) {
            self.selection_refs.insert(
                id,
                SelectionRef {
                    fixture_id: fixture_id.to_string(),
                    position,
                },
            );
        }
    }

    // ---- deltas ---------------------------------------------------------

    fn apply_delta(
        &mut self,
        topic: &str,
        action: char,
        parts: &[String],
        out: &mut Vec<MatchUpdate>,
    ) {
        // hierarchical topics address the leaf item
        let leaf = topic.rsplit('/').next().unwrap_or(topic);
        let core = leaf.strip_suffix(action).unwrap_or(leaf);
        let record = Record::parse(parts.first().map(String::as_str).unwrap_or(""));

        match ItemId::parse(core) {
            ItemId::Event { event_id, .. } => {
                self.apply_event_delta(&event_id, action, &record, out)
            }
            ItemId::Selection {
                fixture_id,
                selection_id,
            } => self.apply_selection_delta(&fixture_id, &selection_id, &record, out),
            ItemId::Market { .. } => trace!(topic, "market deltas carry no state, skipping"),
            ItemId::Unknown => trace!(topic, "delta for unrecognized item, skipping"),
        }
    }

    fn apply_event_delta(
        &mut self,
        event_id: &str,
        action: char,
        record: &Record,
        out: &mut Vec<MatchUpdate>,
    ) {
        let Some(m) = self.matches.get_mut(event_id) else {
            trace!(event_id, "delta for unknown event, dropping");
            return;
        };
        let Some(config) = sports::sport(&m.sport_id) else {
            trace!(event_id, sport = %m.sport_id, "delta for unsupported sport, dropping");
            return;
        };

        let mut changes = Vec::new();

        if let Some(ss) = record.get("SS") {
            let score_changed = m.score_raw != ss;
            m.score_raw = ss.to_string();
            if config.set_scoring {
                let sets = parse_set_scores(ss);
                if sets != m.sets {
                    m.sets = sets;
                    changes.push(format!("sets: {}", serialize_set_scores(&m.sets)));
                }
            } else if score_changed {
                changes.push(format!("score: {ss}"));
            }
        }
        if config.has_point_score {
            if let Some(xp) = record.get("XP") {
                let game = parse_point_score(xp);
                if game != m.current_game {
                    m.current_game = game;
                    changes.push(format!("game: {}-{}", m.current_game.0, m.current_game.1));
                }
            }
        }
        if config.has_serving {
            if let Some(pi) = record.get("PI") {
                let serving = parse_serving(pi);
                if serving != m.serving {
                    m.serving = serving;
                    changes.push(format!("serving: P{serving}"));
                }
            }
        }
        if let Some(tu) = record.get("TU") {
            m.last_updated = tu.to_string();
        }
        if let Some(es) = record.get("ES") {
            m.status_raw = es.to_string();
            m.status = if es.is_empty() {
                MatchStatus::PreMatch
            } else {
                MatchStatus::InPlay
            };
        }

        if action == 'D' {
            let Some(removed) = self.matches.remove(event_id) else {
                return;
            };
            self.fixture_to_event.remove(&removed.fixture_id);
            self.item_to_event.remove(&removed.item_id);
            for market in &removed.markets {
                for selection in &market.selections {
                    self.selection_refs.remove(&selection.id);
                }
            }
            debug!(event_id, "match deleted");
            out.push(MatchUpdate {
                kind: UpdateKind::Delete,
                event_id: event_id.to_string(),
                snapshot: removed,
                changes: vec!["deleted".to_string()],
            });
        } else if !changes.is_empty() {
            out.push(MatchUpdate {
                kind: UpdateKind::Score,
                event_id: event_id.to_string(),
                snapshot: m.clone(),
                changes,
            });
        }
    }

    fn apply_selection_delta(
        &mut self,
        fixture_id: &str,
        selection_id: &str,
        record: &Record,
        out: &mut Vec<MatchUpdate>,
    ) {
        let Some(event_id) = self.fixture_to_event.get(fixture_id).cloned() else {
            trace!(fixture_id, "delta for unregistered fixture, dropping");
            return;
        };
        let Some(m) = self.matches.get_mut(&event_id) else {
            trace!(%event_id, "fixture index points at a missing match, dropping");
            return;
        };

        let team1 = m.team1.clone();
        let team2 = m.team2.clone();
        let mut hits: Vec<Vec<String>> = Vec::new();

        // a selection id may recur across markets within one match; every
        // occurrence is updated and reported
        for market in &mut m.markets {
            let offered = market.selections.len();
            for selection in &mut market.selections {
                if selection.id != selection_id {
                    continue;
                }
                let mut changes = Vec::new();
                if let Some(od) = record.get("OD") {
                    if od != selection.odds {
                        let label = match selection.position {
                            0 => team1.as_str(),
                            1 if offered >= 3 => "Draw",
                            _ => team2.as_str(),
                        };
                        changes.push(format!("{label}: {} → {od}", selection.odds));
                        selection.odds = od.to_string();
                        selection.odds_decimal = fractional_to_decimal(od);
                    }
                }
                if let Some(su) = record.get("SU") {
                    selection.suspended = su == "1";
                }
                if !changes.is_empty() {
                    hits.push(changes);
                }
            }
        }

        if hits.is_empty() {
            return;
        }
        let snapshot = m.clone();
        for changes in hits {
            out.push(MatchUpdate {
                kind: UpdateKind::Odds,
                event_id: event_id.clone(),
                snapshot: snapshot.clone(),
                changes,
            });
        }
    }

    // ---- queries --------------------------------------------------------

    /// Snapshot of every tracked match
    pub fn all_matches(&self) -> Vec<Match> {
        self.matches.values().cloned().collect()
    }

    /// Snapshot of the matches currently in play
    pub fn live_matches(&self) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.status == MatchStatus::InPlay)
            .cloned()
            .collect()
    }

    /// Snapshot of the matches for one sport code
    pub fn matches_by_sport(&self, sport_id: &str) -> Vec<Match> {
        self.matches
            .values()
            .filter(|m| m.sport_id == sport_id)
            .cloned()
            .collect()
    }

    /// Direct lookup by the authoritative event key
    pub fn match_by_event(&self, event_id: &str) -> Option<&Match> {
        self.matches.get(event_id)
    }

    /// Event an odds-side fixture key resolves to
    pub fn event_for_fixture(&self, fixture_id: &str) -> Option<&str> {
        self.fixture_to_event.get(fixture_id).map(String::as_str)
    }

    /// Event a raw EV item id resolves to
    pub fn event_for_item(&self, item_id: &str) -> Option<&str> {
        self.item_to_event.get(item_id).map(String::as_str)
    }

    /// Odds-side coordinates recorded for a selection during a full dump
    pub fn selection_ref(&self, selection_id: &str) -> Option<&SelectionRef> {
        self.selection_refs.get(selection_id)
    }

    /// Number of tracked matches
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
