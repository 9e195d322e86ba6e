//! Response shaping.
//!
//! # Responsibilities
//! - Render the fixed acknowledgement for accepted payloads
//! - Map payload errors to 400 responses with a human-readable reason
//!
//! # Design Decisions
//! - Bodies are byte-exact literals; clients compare them verbatim
//! - `Content-type` is plain `text/plain` with no charset parameter

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body returned for every accepted payload.
pub const ACKNOWLEDGEMENT: &str = "HTTP OK from server a";

/// The 200 response for a valid payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement;

impl IntoResponse for Acknowledgement {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
            ACKNOWLEDGEMENT,
        )
            .into_response()
    }
}

/// Reasons a payload is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("Invalid UTF-8 payload")]
    InvalidUtf8,
}

impl PayloadError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"))],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acknowledgement_headers() {
        let response = Acknowledgement.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn rejection_reasons() {
        assert_eq!(PayloadError::InvalidJson.to_string(), "Invalid JSON payload");
        assert_eq!(PayloadError::InvalidUtf8.to_string(), "Invalid UTF-8 payload");
        assert_eq!(
            PayloadError::InvalidJson.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
