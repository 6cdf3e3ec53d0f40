//! Session layer: connection identity, the live-session registry and the
//! per-connection socket handle given to event handlers.

pub mod disconnect;
pub mod registry;
pub mod session_id;
pub mod socket;

use std::collections::HashMap;

pub use disconnect::DisconnectReason;
pub use registry::SessionRegistry;
pub use session_id::SessionId;
pub use socket::Socket;

/// Handshake credentials taken from the upgrade request's query string.
pub type Auth = HashMap<String, String>;
