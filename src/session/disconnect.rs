//! Why a session ended.

use std::fmt;

use serde::Serialize;

/// Reason reported to [`crate::handler::EventHandler::on_disconnect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisconnectReason {
    /// The client sent a close frame.
    ClientDisconnect,
    /// The stream ended without a close frame.
    TransportClose,
    /// Reading from or writing to the socket failed.
    TransportError,
    /// The server dropped the session (explicit disconnect or shutdown).
    ServerDisconnect,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ClientDisconnect => "client disconnect",
            Self::TransportClose => "transport close",
            Self::TransportError => "transport error",
            Self::ServerDisconnect => "server disconnect",
        };
        f.write_str(s)
    }
}
