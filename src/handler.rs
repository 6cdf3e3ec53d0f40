//! Event subscription seam between the connection loop and the demos.

use std::fmt::Debug;

use crate::protocol::Event;
use crate::session::{DisconnectReason, Socket};

/// Callbacks invoked by the connection loop for one session.
///
/// Callbacks run on the connection's task and must not block: emitting
/// through [`Socket`] only queues the event.
pub trait EventHandler: Debug + Send + Sync + 'static {
    /// Called once, after the session is registered and before any client
    /// frame is read. Events emitted here precede every other server event.
    fn on_connect(&self, socket: &Socket) {
        tracing::info!(sid = %socket.sid(), "connect");
    }

    /// Called for every decoded client event, in arrival order.
    fn on_event(&self, socket: &Socket, event: Event) {
        tracing::debug!(sid = %socket.sid(), event = event.name(), "no handler for event");
    }

    /// Called once, after the session has been removed from the registry.
    fn on_disconnect(&self, socket: &Socket, reason: DisconnectReason) {
        tracing::info!(sid = %socket.sid(), %reason, "disconnect");
    }
}
