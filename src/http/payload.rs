//! The payload handler.
//!
//! Every POST, on any path, lands here. The body is decoded as UTF-8, parsed
//! as JSON and answered with either the fixed acknowledgement or a 400.

use axum::body::Bytes;
use serde_json::Value;

use crate::http::response::{Acknowledgement, PayloadError};

/// Result of inspecting a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// The body is a JSON document.
    Valid { text: String, payload: Value },
    /// The body is text but not JSON.
    InvalidJson { text: String },
    /// The body is not UTF-8.
    InvalidUtf8 { lossy: String },
}

/// Classify a raw body. Pure; performs no logging.
pub fn inspect(body: &[u8]) -> Inspection {
    let text = match std::str::from_utf8(body) {
        Ok(text) => text,
        Err(_) => {
            return Inspection::InvalidUtf8 {
                lossy: String::from_utf8_lossy(body).into_owned(),
            }
        }
    };

    match serde_json::from_str::<Value>(text) {
        Ok(payload) => Inspection::Valid {
            text: text.to_owned(),
            payload,
        },
        Err(_) => Inspection::InvalidJson {
            text: text.to_owned(),
        },
    }
}

/// Handle one POST.
///
/// The body extractor reads exactly `Content-Length` bytes; a request without
/// the header arrives here with an empty body.
pub async fn receive_payload(body: Bytes) -> Result<Acknowledgement, PayloadError> {
    tracing::info!("triggered");

    match inspect(&body) {
        Inspection::Valid { text, payload } => {
            tracing::info!(payload = %text, kind = json_kind(&payload), "Received payload");
            Ok(Acknowledgement)
        }
        Inspection::InvalidJson { text } => {
            tracing::error!(payload = %text, "Error parsing payload");
            Err(PayloadError::InvalidJson)
        }
        Inspection::InvalidUtf8 { lossy } => {
            tracing::error!(payload = %lossy, bytes = body.len(), "Payload is not valid UTF-8");
            Err(PayloadError::InvalidUtf8)
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
