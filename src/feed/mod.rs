//! Transport collaborator: the websocket that carries the push feed

mod client;

pub use client::FeedClient;

use crate::config::Config;

/// Whether a socket URL belongs to the odds push feed. Embeddings that tap
/// every socket a page opens use this to pick the one worth decoding.
pub fn is_feed_socket(url: &str, config: &Config) -> bool {
    url.contains(&config.socket_url_filter)
}
