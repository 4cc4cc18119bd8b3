//! One-line rendering of matches and change events

use chrono::DateTime;

use crate::state::{Match, MatchStatus, MatchUpdate, UpdateKind};

/// Render a match snapshot as a single log-friendly line
pub fn format_match(m: &Match) -> String {
    let mut line = format!("{} | {}", m.sport_name, m.name);
    if !m.tournament.is_empty() {
        line.push_str(&format!(" ({})", m.tournament));
    }
    match m.status {
        MatchStatus::InPlay => {
            line.push_str(" | in-play");
            if !m.score_raw.is_empty() {
                line.push_str(&format!(" {}", m.score_raw));
            }
            if m.current_game != ("0".to_string(), "0".to_string()) {
                line.push_str(&format!(" ({}-{})", m.current_game.0, m.current_game.1));
            }
            if m.serving != 0 {
                line.push_str(&format!(" serve:P{}", m.serving));
            }
        }
        MatchStatus::PreMatch => {
            line.push_str(" | pre-match");
            if let Some(start) = DateTime::from_timestamp(m.kick_off, 0).filter(|_| m.kick_off > 0)
            {
                line.push_str(&format!(" starts {}", start.format("%Y-%m-%d %H:%M")));
            }
        }
    }
    line
}

/// Render a change event as a single line: kind, fixture, change list
pub fn format_update(update: &MatchUpdate) -> String {
    let kind = match update.kind {
        UpdateKind::Score => "score",
        UpdateKind::Odds => "odds",
        UpdateKind::Delete => "delete",
    };
    format!(
        "[{kind}] {} {}: {}",
        update.event_id,
        update.snapshot.name,
        update.changes.join("; ")
    )
}
