//! Error taxonomy shared by every client of the stocklink backend.

use serde::Deserialize;
use thiserror::Error;

/// Failure of a REST round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response. `message` is the server's own message when the body
    /// carried one, otherwise the raw body.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    /// The server rejected the operation in a 2xx envelope with
    /// `status: false`. The server is authoritative; its message is surfaced
    /// verbatim and never second-guessed client-side.
    #[error("request rejected: {0}")]
    Rejected(String),
    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Failure of a live subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Benign termination: the call ended with an abort/EOF-class signal.
    /// Recoverable by reconnecting.
    #[error("stream closed")]
    Closed,
    /// The subscription could not be established.
    #[error("connect failed: {0}")]
    Connect(String),
    /// A genuine protocol or server failure mid-stream. Not recoverable
    /// without a fresh subscription.
    #[error("stream error: {0}")]
    Fatal(String),
}

impl StreamError {
    /// Benign terminations are retried on a fixed delay; anything else is
    /// surfaced and left unrecovered.
    pub fn is_benign(&self) -> bool {
        matches!(self, StreamError::Closed)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Pull a user-facing message out of an error response body. The backend
/// wraps errors in the same `{status, message, data}` envelope as successes;
/// prefer its `message` over dumping raw JSON at the user.
pub fn server_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    if parsed.message.trim().is_empty() {
        None
    } else {
        Some(parsed.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_envelope_message() {
        let body = r#"{"status":false,"message":"insufficient stock","data":null}"#;
        assert_eq!(server_message(body).as_deref(), Some("insufficient stock"));
        assert_eq!(server_message("not json"), None);
        assert_eq!(server_message(r#"{"status":false,"message":""}"#), None);
    }

    #[test]
    fn only_closed_is_benign() {
        assert!(StreamError::Closed.is_benign());
        assert!(!StreamError::Connect("refused".into()).is_benign());
        assert!(!StreamError::Fatal("boom".into()).is_benign());
    }
}
