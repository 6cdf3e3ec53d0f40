//! Axum WebSocket upgrade handler.

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::response::Response;

use super::SESSION_ID_HEADER;
use super::connection::run_connection;
use crate::app_state::AppState;
use crate::error::FiddleError;
use crate::session::{Auth, SessionId};

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Query parameters become the session's [`Auth`] map.
///
/// # Errors
///
/// Returns [`FiddleError::CapacityExceeded`] (503) when the connection limit
/// is reached.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(auth): Query<Auth>,
    State(state): State<AppState>,
) -> Result<Response, FiddleError> {
    let max = state.registry.max_sessions();
    if state.registry.len() >= max {
        tracing::warn!(max, "rejecting upgrade: connection limit reached");
        return Err(FiddleError::CapacityExceeded(max));
    }

    let sid = SessionId::new();
    let mut response = ws.on_upgrade(move |socket| run_connection(socket, sid, auth, state));
    if let Ok(value) = HeaderValue::from_str(&sid.to_string()) {
        response.headers_mut().insert(SESSION_ID_HEADER, value);
    }
    Ok(response)
}
