//! Live-Odds Feed Decoder
//!
//! Connects to the push-odds host, decodes every transport payload, and
//! prints the resulting change events one per line.

use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use odds_feed::format::format_update;
use odds_feed::{Config, FeedClient, StateManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let config = Config::load()?;
    info!(endpoint = %config.ws_endpoint, "Starting odds feed decoder");

    let mut client = FeedClient::new(config);
    client.connect().await?;

    // The decoder is synchronous and single-threaded; the one consumer task
    // owns it outright.
    let mut state = StateManager::new();

    loop {
        match client.recv().await {
            Ok(Some(payload)) => {
                for update in state.process(&payload) {
                    println!("{}", format_update(&update));
                }
                debug!(matches = state.len(), "payload applied");
            }
            Ok(None) => continue,
            Err(e) => {
                // session management is the embedding's concern; report and stop
                error!(error = %e, "Feed connection lost, exiting");
                break;
            }
        }
    }

    Ok(())
}
