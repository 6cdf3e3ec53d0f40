//! Live-session storage with per-session outbound queues.
//!
//! [`SessionRegistry`] owns the only sender of every session's outbound
//! queue. Removing a session drops that sender, which closes the queue and
//! ends the connection loop once the already-queued events are flushed.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::{Auth, SessionId};
use crate::error::FiddleError;
use crate::protocol::Event;

/// Registry entry for one connected session.
#[derive(Debug)]
struct SessionEntry {
    sender: mpsc::Sender<Event>,
    auth: Arc<Auth>,
}

/// Central store for all connected sessions.
///
/// Uses a synchronous `RwLock` because handlers emit from synchronous
/// callbacks and no critical section awaits.
///
/// # Invariant
///
/// Once [`SessionRegistry::remove`] returns, no further event can be queued
/// for that session.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    queue_capacity: usize,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Creates an empty registry.
    ///
    /// `queue_capacity` bounds each session's outbound queue (minimum 1);
    /// `max_sessions` bounds the number of concurrent sessions.
    #[must_use]
    pub fn new(queue_capacity: usize, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            queue_capacity: queue_capacity.max(1),
            max_sessions,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a new session and returns the receiving end of its
    /// outbound queue.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::CapacityExceeded`] if `max_sessions` sessions
    /// are already connected, or [`FiddleError::Internal`] if `sid` is
    /// already registered (should never happen with UUID v4).
    pub fn register(
        &self,
        sid: SessionId,
        auth: Auth,
    ) -> Result<mpsc::Receiver<Event>, FiddleError> {
        let mut map = self.write();
        if map.len() >= self.max_sessions {
            return Err(FiddleError::CapacityExceeded(self.max_sessions));
        }
        if map.contains_key(&sid) {
            return Err(FiddleError::Internal(format!(
                "session {sid} already registered"
            )));
        }
        let (sender, receiver) = mpsc::channel(self.queue_capacity);
        map.insert(
            sid,
            SessionEntry {
                sender,
                auth: Arc::new(auth),
            },
        );
        Ok(receiver)
    }

    /// Queues an event for a single session.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::SessionNotFound`] if the session is gone and
    /// [`FiddleError::Backpressure`] if its queue is full.
    pub fn emit_to(&self, sid: SessionId, event: Event) -> Result<(), FiddleError> {
        let map = self.read();
        let entry = map.get(&sid).ok_or(FiddleError::SessionNotFound(sid))?;
        entry.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => FiddleError::Backpressure(sid),
            TrySendError::Closed(_) => FiddleError::SessionNotFound(sid),
        })
    }

    /// Queues an event for every session except `skip`.
    ///
    /// Best-effort, unlike [`SessionRegistry::emit_to`]: sessions with a full
    /// queue are skipped. Returns the number of sessions that accepted the
    /// event.
    pub fn broadcast(&self, event: &Event, skip: Option<SessionId>) -> usize {
        let map = self.read();
        let mut delivered = 0;
        for (sid, entry) in map.iter() {
            if Some(*sid) == skip {
                continue;
            }
            match entry.sender.try_send(event.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(%sid, event = event.name(), "broadcast dropped: queue full");
                }
                Err(TrySendError::Closed(_)) => {}
            }
        }
        delivered
    }

    /// Removes a session, closing its outbound queue.
    ///
    /// Returns `true` if the session was registered.
    pub fn remove(&self, sid: SessionId) -> bool {
        self.write().remove(&sid).is_some()
    }

    /// Removes every session. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut map = self.write();
        let count = map.len();
        map.clear();
        count
    }

    /// Returns `true` if the session is registered.
    #[must_use]
    pub fn contains(&self, sid: SessionId) -> bool {
        self.read().contains_key(&sid)
    }

    /// Returns the handshake credentials of a session.
    #[must_use]
    pub fn auth(&self, sid: SessionId) -> Option<Arc<Auth>> {
        self.read().get(&sid).map(|entry| Arc::clone(&entry.auth))
    }

    /// Number of connected sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no session is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Maximum number of concurrent sessions.
    #[must_use]
    pub const fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
