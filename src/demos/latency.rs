//! Latency demo: answer every probe with a reply signal.

use super::{PING_FROM_CLIENT, PONG_FROM_SERVER};
use crate::error::FiddleError;
use crate::handler::EventHandler;
use crate::protocol::Event;
use crate::session::{DisconnectReason, Socket};

/// Replies to each `ping_from_client` with one `pong_from_server`.
///
/// Probe arguments are ignored and the reply carries none. A probe that
/// arrives after the session was dropped produces no reply.
#[derive(Debug, Default, Clone, Copy)]
pub struct LatencyHandler;

impl EventHandler for LatencyHandler {
    fn on_connect(&self, socket: &Socket) {
        tracing::info!(sid = %socket.sid(), "connect");
    }

    fn on_event(&self, socket: &Socket, event: Event) {
        if event.name() != PING_FROM_CLIENT {
            tracing::debug!(sid = %socket.sid(), event = event.name(), "ignored");
            return;
        }
        match socket.emit(PONG_FROM_SERVER, Vec::new()) {
            Ok(()) => {}
            Err(FiddleError::SessionNotFound(_)) => {
                tracing::debug!(sid = %socket.sid(), "probe after disconnect");
            }
            Err(e) => tracing::warn!(sid = %socket.sid(), error = %e, "failed to emit pong"),
        }
    }

    fn on_disconnect(&self, socket: &Socket, reason: DisconnectReason) {
        tracing::info!(sid = %socket.sid(), %reason, "disconnect");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;
    use crate::session::{Auth, SessionId, SessionRegistry};

    fn connected() -> (Socket, mpsc::Receiver<Event>) {
        let registry = Arc::new(SessionRegistry::new(16, 8));
        let sid = SessionId::new();
        let Ok(rx) = registry.register(sid, Auth::new()) else {
            panic!("register failed");
        };
        (Socket::new(sid, Arc::default(), registry), rx)
    }

    #[test]
    fn each_ping_gets_one_pong() {
        let (socket, mut rx) = connected();
        for _ in 0..3 {
            LatencyHandler.on_event(&socket, Event::signal(PING_FROM_CLIENT));
        }
        let mut pongs = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event.name(), PONG_FROM_SERVER);
            assert!(event.args().is_empty());
            pongs += 1;
        }
        assert_eq!(pongs, 3);
    }

    #[test]
    fn ping_arguments_are_dropped() {
        let (socket, mut rx) = connected();
        LatencyHandler.on_event(&socket, Event::new(PING_FROM_CLIENT, vec![json!(42)]));
        let Ok(event) = rx.try_recv() else {
            panic!("pong missing");
        };
        assert!(event.args().is_empty());
    }

    #[test]
    fn other_events_get_no_reply() {
        let (socket, mut rx) = connected();
        LatencyHandler.on_event(&socket, Event::signal("hello"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn no_pong_after_disconnect() {
        let (socket, mut rx) = connected();
        socket.disconnect();
        LatencyHandler.on_event(&socket, Event::signal(PING_FROM_CLIENT));
        assert!(matches!(
            rx.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
