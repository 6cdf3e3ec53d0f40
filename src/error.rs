//! Error types with HTTP status code mapping.
//!
//! [`FiddleError`] is the central error type for the server and the client.
//! Each variant maps to a numeric code and an HTTP status so that failures on
//! the HTTP surface (e.g. a rejected WebSocket upgrade) render a structured
//! JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::session::SessionId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "connection limit of 1024 sessions reached"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum shared by the server, the handlers and the client.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status               |
/// |-----------|------------------|---------------------------|
/// | 1000–1999 | Frame/Validation | 400 Bad Request           |
/// | 2000–2999 | Session state    | 404 Not Found / 409 / 408 |
/// | 3000–3999 | Server           | 500 / 503                 |
/// | 4000–4999 | Transport        | 502 Bad Gateway           |
#[derive(Debug, thiserror::Error)]
pub enum FiddleError {
    /// A text frame could not be decoded as an event.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Application code tried to emit a reserved event name.
    #[error("event name is reserved: {0}")]
    ReservedEvent(String),

    /// The session is not (or no longer) connected.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The session's outbound queue is full.
    #[error("outbound queue full for session {0}")]
    Backpressure(SessionId),

    /// The server refused a new connection.
    #[error("connection limit of {0} sessions reached")]
    CapacityExceeded(usize),

    /// The connection was closed.
    #[error("disconnected")]
    Disconnected,

    /// No event arrived before the deadline.
    #[error("timed out waiting for an event")]
    Timeout,

    /// A latency probe was completed without being started.
    #[error("no latency probe in flight")]
    NoProbeInFlight,

    /// WebSocket transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FiddleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidFrame(_) => 1001,
            Self::ReservedEvent(_) => 1002,
            Self::SessionNotFound(_) => 2001,
            Self::Disconnected => 2002,
            Self::Timeout => 2003,
            Self::NoProbeInFlight => 2004,
            Self::Backpressure(_) => 3001,
            Self::CapacityExceeded(_) => 3002,
            Self::Config(_) => 3003,
            Self::Internal(_) => 3000,
            Self::Transport(_) => 4001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFrame(_) | Self::ReservedEvent(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::Disconnected | Self::NoProbeInFlight => StatusCode::CONFLICT,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Backpressure(_) | Self::CapacityExceeded(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for FiddleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn capacity_exceeded_is_service_unavailable() {
        let err = FiddleError::CapacityExceeded(8);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), 3002);
        assert_eq!(err.to_string(), "connection limit of 8 sessions reached");
    }

    #[test]
    fn into_response_carries_status() {
        let response = FiddleError::InvalidFrame("empty array".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn session_errors_render_sid() {
        let sid = SessionId::new();
        let err = FiddleError::SessionNotFound(sid);
        assert!(err.to_string().contains(&sid.to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
