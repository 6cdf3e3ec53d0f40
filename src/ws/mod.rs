//! WebSocket layer: upgrade handling and the per-connection loop.
//!
//! The endpoint at `/ws` carries the event frames described in
//! [`crate::protocol`].

pub mod connection;
pub mod handler;

/// Upgrade response header carrying the assigned session ID.
pub const SESSION_ID_HEADER: &str = "x-session-id";
