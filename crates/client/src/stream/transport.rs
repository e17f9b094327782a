//! Transport seam for live subscriptions.
//!
//! The subscription loop only ever sees a [`StreamTransport`], so tests can
//! script connections without sockets. The production implementation speaks
//! JSON over WebSocket: one connection per subscription, batches as text
//! frames.

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use stocklink_shared::{StreamError, WatchRequest};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, protocol::Message};
use url::Url;

/// Batches as raw JSON; the typed projection happens in the watcher layer.
pub type BatchStream = Pin<Box<dyn Stream<Item = Result<serde_json::Value, StreamError>> + Send>>;

#[async_trait]
pub trait StreamTransport: Send + Sync {
    /// Open one long-lived server-streaming call for `request`. The returned
    /// stream ends (or yields `StreamError::Closed`) on benign termination
    /// and yields `StreamError::Fatal` on anything else.
    async fn open(&self, request: &WatchRequest) -> Result<BatchStream, StreamError>;
}

/// WebSocket transport against the streaming collaborator.
pub struct WsTransport {
    base_url: Url,
}

impl WsTransport {
    pub fn new(base_url: &str) -> Result<Self, StreamError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StreamError::Connect(format!("invalid stream url {base_url:?}: {e}")))?;
        Ok(Self { base_url })
    }

    fn endpoint(&self, request: &WatchRequest) -> Result<Url, StreamError> {
        let mut url = self
            .base_url
            .join(request.path().trim_start_matches('/'))
            .map_err(|e| StreamError::Connect(e.to_string()))?;
        let params = request.query();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl StreamTransport for WsTransport {
    async fn open(&self, request: &WatchRequest) -> Result<BatchStream, StreamError> {
        let url = self.endpoint(request)?;
        let topic = request.topic();
        let (ws, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| StreamError::Connect(e.to_string()))?;
        tracing::debug!(topic, "stream connected");

        let batches = ws.filter_map(move |item| {
            let mapped = match item {
                Ok(Message::Text(text)) => match serde_json::from_str(text.as_str()) {
                    Ok(value) => Some(Ok(value)),
                    Err(e) => {
                        // Tolerate a malformed frame rather than killing the
                        // subscription over it.
                        tracing::warn!(topic, error = %e, "discarding undecodable frame");
                        None
                    }
                },
                Ok(Message::Close(_)) => Some(Err(StreamError::Closed)),
                // Pings are answered by tungstenite itself.
                Ok(Message::Ping(_) | Message::Pong(_)) => None,
                Ok(_) => None,
                Err(e) => Some(Err(classify_ws_error(&e))),
            };
            async move { mapped }
        });

        Ok(Box::pin(batches))
    }
}

/// Abort/EOF-class socket failures are benign terminations; everything else
/// is a genuine stream error.
fn classify_ws_error(error: &tungstenite::Error) -> StreamError {
    use tungstenite::error::ProtocolError;
    match error {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
            StreamError::Closed
        }
        tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake) => {
            StreamError::Closed
        }
        other => StreamError::Fatal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_carries_topic_path_and_params() {
        let transport = WsTransport::new("ws://localhost:50051").unwrap();
        let url = transport
            .endpoint(&WatchRequest::Warehouses {
                include_metrics: true,
                limit: 4,
            })
            .unwrap();
        assert_eq!(url.as_str(), "ws://localhost:50051/watch/warehouses?metrics=true&limit=4");

        let bare = transport.endpoint(&WatchRequest::Prices).unwrap();
        assert_eq!(bare.as_str(), "ws://localhost:50051/watch/prices");
    }

    #[test]
    fn reset_without_close_is_benign() {
        use tungstenite::error::ProtocolError;
        let e = tungstenite::Error::Protocol(ProtocolError::ResetWithoutClosingHandshake);
        assert!(classify_ws_error(&e).is_benign());
        let io = tungstenite::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(!classify_ws_error(&io).is_benign());
    }
}
