//! WebSocket connection loop.
//!
//! Registers the session, runs the demo's connect callback, then forwards
//! client frames to the handler and queued server events to the client
//! until either side goes away.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::app_state::AppState;
use crate::protocol::Event;
use crate::session::{Auth, DisconnectReason, SessionId, Socket};

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Writes events queued for this session, in order, ahead of reading.
/// - Decodes client text frames and dispatches them to the handler.
/// - When the session's queue closes (the session was removed), sends a
///   close frame and ends with [`DisconnectReason::ServerDisconnect`].
pub async fn run_connection(mut socket: WebSocket, sid: SessionId, auth: Auth, state: AppState) {
    let mut outbound = match state.registry.register(sid, auth) {
        Ok(rx) => rx,
        Err(e) => {
            tracing::warn!(%sid, error = %e, "session rejected");
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let auth = state.registry.auth(sid).unwrap_or_default();
    let client = Socket::new(sid, auth, Arc::clone(&state.registry));
    state.handler.on_connect(&client);

    let (mut ws_tx, mut ws_rx) = socket.split();

    let reason = loop {
        tokio::select! {
            biased;

            // Event queued for this session; drained before the next client
            // frame is read
            event = outbound.recv() => {
                match event {
                    Some(event) => {
                        let text = match event.encode() {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::warn!(%sid, error = %e, "dropping unencodable event");
                                continue;
                            }
                        };
                        if ws_tx.send(Message::text(text)).await.is_err() {
                            break DisconnectReason::TransportError;
                        }
                    }
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break DisconnectReason::ServerDisconnect;
                    }
                }
            }
            // Incoming frame from client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => match Event::decode(&text) {
                        Ok(event) => state.handler.on_event(&client, event),
                        Err(e) => tracing::warn!(%sid, error = %e, "malformed frame ignored"),
                    },
                    Some(Ok(Message::Close(_))) => break DisconnectReason::ClientDisconnect,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(%sid, error = %e, "ws read failed");
                        break DisconnectReason::TransportError;
                    }
                    None => break DisconnectReason::TransportClose,
                }
            }
        }
    };

    state.registry.remove(sid);
    state.handler.on_disconnect(&client, reason);
    tracing::debug!(%sid, "ws connection closed");
}
