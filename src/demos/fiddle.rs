//! Fiddle demo: announce a fixed payload on connect.

use serde_json::{Value, json};

use super::HELLO;
use crate::handler::EventHandler;
use crate::protocol::Event;
use crate::session::{DisconnectReason, Socket};

/// Arguments of the `hello` announcement: `(1, "2", {"hello": "you"})`.
#[must_use]
pub fn hello_payload() -> Vec<Value> {
    vec![json!(1), json!("2"), json!({ "hello": "you" })]
}

/// Emits `hello` once to every new session and logs client events.
#[derive(Debug, Default, Clone, Copy)]
pub struct FiddleHandler;

impl EventHandler for FiddleHandler {
    fn on_connect(&self, socket: &Socket) {
        tracing::info!(sid = %socket.sid(), auth = ?socket.auth(), "connect");
        if let Err(e) = socket.emit(HELLO, hello_payload()) {
            tracing::warn!(sid = %socket.sid(), error = %e, "failed to emit hello");
        }
    }

    fn on_event(&self, socket: &Socket, event: Event) {
        tracing::info!(sid = %socket.sid(), %event, "received");
    }

    fn on_disconnect(&self, socket: &Socket, reason: DisconnectReason) {
        tracing::info!(sid = %socket.sid(), %reason, "disconnect");
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::{Auth, SessionId, SessionRegistry};

    #[test]
    fn connect_emits_hello_exactly_once() {
        let registry = Arc::new(SessionRegistry::new(8, 8));
        let sid = SessionId::new();
        let Ok(mut rx) = registry.register(sid, Auth::new()) else {
            panic!("register failed");
        };
        let socket = Socket::new(sid, Arc::default(), Arc::clone(&registry));

        FiddleHandler.on_connect(&socket);
        FiddleHandler.on_event(&socket, Event::signal("anything"));

        let Ok(event) = rx.try_recv() else {
            panic!("hello not queued");
        };
        assert_eq!(event.name(), HELLO);
        assert_eq!(event.args(), hello_payload().as_slice());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn payload_is_literal() {
        let Ok(text) = Event::new(HELLO, hello_payload()).encode() else {
            panic!("encode failed");
        };
        assert_eq!(text, r#"["hello",1,"2",{"hello":"you"}]"#);
    }
}
