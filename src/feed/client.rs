//! WebSocket client for the push-odds host
//!
//! Handles the handshake and frame reception. The push host rejects bare
//! clients, so the handshake carries the same Origin, subprotocol, and user
//! agent a browser session would. Reconnection is the embedding's problem:
//! a dropped connection surfaces as an error and the client stops.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    connect_async,
    tungstenite::client::IntoClientRequest,
    tungstenite::http::header::{self, HeaderValue},
    tungstenite::protocol::Message,
    MaybeTlsStream, WebSocketStream,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FeedError, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket client for a single feed connection
pub struct FeedClient {
    stream: Option<WsStream>,
    config: Config,
}

impl FeedClient {
    /// Create a new, unconnected client
    pub fn new(config: Config) -> Self {
        Self {
            stream: None,
            config,
        }
    }

    /// Perform the handshake against the configured endpoint
    pub async fn connect(&mut self) -> Result<()> {
        let mut request = self
            .config
            .ws_endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| FeedError::Handshake(format!("bad endpoint: {e}")))?;

        let headers = request.headers_mut();
        headers.insert(header::ORIGIN, header_value(&self.config.origin)?);
        headers.insert(
            header::SEC_WEBSOCKET_PROTOCOL,
            header_value(&self.config.ws_protocol)?,
        );
        headers.insert(header::USER_AGENT, header_value(&self.config.user_agent)?);

        info!(endpoint = %self.config.ws_endpoint, "Connecting to odds push feed");

        let (ws_stream, response) = connect_async(request)
            .await
            .map_err(|e| FeedError::Connection(format!("Failed to connect: {e}")))?;

        info!(status = ?response.status(), "Feed socket connected");
        self.stream = Some(ws_stream);

        Ok(())
    }

    /// Receive the next payload. `Ok(None)` means a control frame was
    /// handled and there is nothing to decode yet.
    pub async fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| FeedError::Connection("Not connected".to_string()))?;

        match stream.next().await {
            Some(Ok(Message::Binary(data))) => {
                debug!(len = data.len(), "Received binary payload");
                Ok(Some(data))
            }
            Some(Ok(Message::Text(text))) => {
                debug!(len = text.len(), "Received text payload");
                Ok(Some(text.into_bytes()))
            }
            Some(Ok(Message::Ping(data))) => {
                debug!("Received ping, sending pong");
                if let Some(stream) = self.stream.as_mut() {
                    let _ = stream.send(Message::Pong(data)).await;
                }
                Ok(None)
            }
            Some(Ok(Message::Pong(_))) => Ok(None),
            Some(Ok(Message::Close(frame))) => {
                warn!(frame = ?frame, "Received close frame");
                self.stream = None;
                Err(FeedError::Connection("Connection closed".to_string()))
            }
            Some(Ok(Message::Frame(_))) => Ok(None),
            Some(Err(e)) => {
                self.stream = None;
                Err(FeedError::Message(e.to_string()))
            }
            None => {
                warn!("Feed stream ended");
                self.stream = None;
                Err(FeedError::Connection("Stream ended".to_string()))
            }
        }
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Close the connection
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.close(None).await;
        }
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| FeedError::Config(format!("bad header value: {e}")))
}
