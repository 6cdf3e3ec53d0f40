//! Per-connection handle passed to event handlers.

use std::sync::Arc;

use serde_json::Value;

use super::{Auth, SessionId, SessionRegistry};
use crate::error::FiddleError;
use crate::protocol::Event;

/// Handle to one connected session.
///
/// Every emission goes through the [`SessionRegistry`], so a socket whose
/// session has been removed can no longer deliver anything. Events emitted
/// from the same socket are delivered in order.
#[derive(Debug, Clone)]
pub struct Socket {
    sid: SessionId,
    auth: Arc<Auth>,
    registry: Arc<SessionRegistry>,
}

impl Socket {
    /// Creates a handle for a registered session.
    #[must_use]
    pub fn new(sid: SessionId, auth: Arc<Auth>, registry: Arc<SessionRegistry>) -> Self {
        Self {
            sid,
            auth,
            registry,
        }
    }

    /// Session identifier.
    #[must_use]
    pub const fn sid(&self) -> SessionId {
        self.sid
    }

    /// Handshake credentials.
    #[must_use]
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Returns `true` while the session is registered.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.registry.contains(self.sid)
    }

    /// Emits an event to this session.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::ReservedEvent`] for lifecycle names,
    /// [`FiddleError::SessionNotFound`] once the session is gone and
    /// [`FiddleError::Backpressure`] when its queue is full.
    pub fn emit(&self, name: &str, args: Vec<Value>) -> Result<(), FiddleError> {
        let event = Event::outgoing(name, args)?;
        self.registry.emit_to(self.sid, event)
    }

    /// Emits an event to every other connected session.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::ReservedEvent`] for lifecycle names.
    pub fn broadcast(&self, name: &str, args: Vec<Value>) -> Result<usize, FiddleError> {
        let event = Event::outgoing(name, args)?;
        Ok(self.registry.broadcast(&event, Some(self.sid)))
    }

    /// Drops the session. Events already queued are still flushed before the
    /// server closes the connection.
    pub fn disconnect(&self) -> bool {
        self.registry.remove(self.sid)
    }
}
