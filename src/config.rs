//! Configuration module for the odds feed handler

use serde::Deserialize;
use std::env;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// WebSocket endpoint of the push-odds host
    pub ws_endpoint: String,

    /// Substring identifying feed sockets when an embedding taps several
    /// connections at once
    pub socket_url_filter: String,

    /// Origin header sent on the websocket handshake
    pub origin: String,

    /// Sec-WebSocket-Protocol value expected by the push host
    pub ws_protocol: String,

    /// User agent sent on the handshake
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            ws_endpoint: env::var("FEED_WS_ENDPOINT")
                .unwrap_or_else(|_| "wss://premws-pt1.us.365lpodds.com/zap/".to_string()),
            socket_url_filter: env::var("FEED_SOCKET_FILTER")
                .unwrap_or_else(|_| "premws-pt1.us.365lpodds.com".to_string()),
            origin: env::var("FEED_ORIGIN")
                .unwrap_or_else(|_| "https://www.bet365.com".to_string()),
            ws_protocol: env::var("FEED_WS_PROTOCOL")
                .unwrap_or_else(|_| "zap-protocol-v2".to_string()),
            user_agent: env::var("FEED_USER_AGENT").unwrap_or_else(|_| {
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/145.0.0.0 Safari/537.36"
                    .to_string()
            }),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ws_endpoint: "wss://premws-pt1.us.365lpodds.com/zap/".to_string(),
            socket_url_filter: "premws-pt1.us.365lpodds.com".to_string(),
            origin: "https://www.bet365.com".to_string(),
            ws_protocol: "zap-protocol-v2".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/145.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}
