//! Live world model
//!
//! Owned exclusively by the [`StateManager`]; everything it hands out is a
//! snapshot clone, so callers never observe intermediate mutation.

mod manager;

pub use manager::StateManager;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle phase derived from the `ES` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    PreMatch,
    InPlay,
}

/// One priced outcome inside a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub id: String,
    /// Fractional odds as received (`"9/2"`)
    pub odds: String,
    /// `n/d + 1`, zero when the fractional string is absent or malformed
    pub odds_decimal: Decimal,
    /// Wire ordering slot (`OR`); doubles as the home/draw/away discriminant
    pub position: u32,
    pub suspended: bool,
}

/// An offered market; selections keep wire insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub name: String,
    pub suspended: bool,
    pub selections: Vec<Selection>,
}

/// One live (or imminent) sporting event with its scoreboard and markets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Authoritative key
    pub event_id: String,
    /// Odds-side key (`OI` on the wire), empty when the dump carried none
    pub fixture_id: String,
    /// Raw `ID` field of the originating EV record
    pub item_id: String,
    pub name: String,
    pub sport_id: String,
    pub sport_name: String,
    pub team1: String,
    pub team2: String,
    pub tournament: String,
    pub tournament_code: String,
    pub status: MatchStatus,
    /// Raw `ES` value; kept verbatim, only its emptiness is interpreted
    pub status_raw: String,
    /// Raw `SS` value
    pub score_raw: String,
    /// Per-set games pairs; populated only for set-scoring sports
    pub sets: Vec<(u32, u32)>,
    /// Within-game score; meaningful only for point-score sports
    pub current_game: (String, String),
    /// 0 = sport has no serving indicator, otherwise 1 or 2
    pub serving: u8,
    /// Raw `TU` value
    pub last_updated: String,
    /// Scheduled start, epoch seconds, 0 when unknown
    pub kick_off: i64,
    /// Markets in wire insertion order
    pub markets: Vec<Market>,
}

impl Match {
    /// Market by id, if offered
    pub fn market(&self, market_id: &str) -> Option<&Market> {
        self.markets.iter().find(|m| m.id == market_id)
    }
}

/// Kind of change a delta produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateKind {
    Score,
    Odds,
    Delete,
}

/// One emitted change event
#[derive(Debug, Clone, Serialize)]
pub struct MatchUpdate {
    #[serde(rename = "type")]
    pub kind: UpdateKind,
    pub event_id: String,
    /// Snapshot of the match after (for deletes: as of) the mutation
    #[serde(rename = "match")]
    pub snapshot: Match,
    /// Human-readable change descriptions, wire order
    pub changes: Vec<String>,
}

/// Odds-side coordinates of a selection seen during a full dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRef {
    pub fixture_id: String,
    pub position: u32,
}
