//! # socket-fiddle
//!
//! Real-time event demos over an Axum WebSocket server.
//!
//! Two demos share one event layer: named events with positional JSON
//! arguments, exchanged as `["name", arg0, arg1, ...]` text frames.
//!
//! - **fiddle**: the server greets every new session with
//!   `hello(1, "2", {"hello": "you"})`.
//! - **latency**: the server answers each `ping_from_client` with a
//!   `pong_from_server`; the client measures the round trip.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser page, fiddle-client, latency-client)
//!     │
//!     ├── HTTP (api/): /health, /, /static
//!     ├── WS Handler (ws/): /ws upgrade + connection loop
//!     │
//!     ├── EventHandler (handler) ── FiddleHandler | LatencyHandler (demos/)
//!     │
//!     └── SessionRegistry (session/): sid → outbound queue
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod demos;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod session;
pub mod ws;
