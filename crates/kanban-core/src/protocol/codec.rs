//! JSON codec for the front-end protocol.
//!
//! Requests arrive as text (whatever the page handed to the host primitive)
//! and replies leave as text.  Both directions use `serde_json`.

use thiserror::Error;

use crate::protocol::messages::{Action, Response};

/// Errors that can occur while decoding a request or encoding a reply.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The request text was not a JSON object of a known `cmd`.
    #[error("malformed request: {0}")]
    MalformedRequest(#[source] serde_json::Error),

    /// The reply could not be serialized.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Decodes one request sent by the front-end.
///
/// # Errors
///
/// Returns [`ProtocolError::MalformedRequest`] if `text` is not valid JSON or
/// does not match any [`Action`] variant.
///
/// # Examples
///
/// ```rust
/// use kanban_core::{decode_action, Action};
///
/// let action = decode_action(r#"{"cmd":"Init"}"#).unwrap();
/// assert_eq!(action, Action::Init);
/// ```
pub fn decode_action(text: &str) -> Result<Action, ProtocolError> {
    serde_json::from_str(text).map_err(ProtocolError::MalformedRequest)
}

/// Encodes one reply for the front-end.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
pub fn encode_response(response: &Response) -> Result<String, ProtocolError> {
    serde_json::to_string(response).map_err(ProtocolError::Encode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
