//! Event frames exchanged over the WebSocket.
//!
//! Every frame is a single text message carrying a JSON array whose first
//! element is the event name and whose remaining elements are the event's
//! positional arguments.

pub mod event;

pub use event::{Event, RESERVED_EVENTS};
