//! Live-Odds Feed Decoder
//!
//! This crate decodes the proprietary push protocol of a live-odds feed and
//! maintains a queryable in-memory model of every live sporting event the
//! upstream publishes: identity, scoreboard, and offered markets with their
//! selections and odds. Bytes of one transport payload go into
//! [`StateManager::process`]; typed [`MatchUpdate`] events come out.

pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod protocol;
pub mod sports;
pub mod state;

pub use config::Config;
pub use error::{FeedError, Result};
pub use feed::FeedClient;
pub use state::{Market, Match, MatchStatus, MatchUpdate, Selection, StateManager, UpdateKind};
