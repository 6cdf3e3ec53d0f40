//! Named event with positional JSON arguments.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::FiddleError;

/// Event names owned by the connection lifecycle.
///
/// Handlers observe these through [`crate::handler::EventHandler`] callbacks;
/// they can never travel as application frames.
pub const RESERVED_EVENTS: [&str; 4] = ["connect", "connect_error", "disconnect", "disconnecting"];

/// A named event and its arguments.
///
/// On the wire: `["hello", 1, "2", {"hello": "you"}]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    args: Vec<Value>,
}

impl Event {
    /// Creates an event with the given name and arguments.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Creates an event without arguments.
    #[must_use]
    pub fn signal(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Creates an application event, rejecting reserved and empty names.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::ReservedEvent`] if `name` is one of
    /// [`RESERVED_EVENTS`], or [`FiddleError::InvalidFrame`] if it is empty.
    pub fn outgoing(name: impl Into<String>, args: Vec<Value>) -> Result<Self, FiddleError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FiddleError::InvalidFrame("empty event name".to_string()));
        }
        if is_reserved(&name) {
            return Err(FiddleError::ReservedEvent(name));
        }
        Ok(Self { name, args })
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional arguments.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Serializes the event to its JSON array frame.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::Internal`] if an argument fails to serialize.
    pub fn encode(&self) -> Result<String, FiddleError> {
        serde_json::to_string(self).map_err(|e| FiddleError::Internal(e.to_string()))
    }

    /// Parses a JSON array frame.
    ///
    /// # Errors
    ///
    /// Returns [`FiddleError::InvalidFrame`] if the text is not JSON, not an
    /// array, empty, or does not start with a non-empty string, and
    /// [`FiddleError::ReservedEvent`] if the name is reserved.
    pub fn decode(text: &str) -> Result<Self, FiddleError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| FiddleError::InvalidFrame(e.to_string()))?;
        let Value::Array(items) = value else {
            return Err(FiddleError::InvalidFrame("expected a JSON array".to_string()));
        };
        let mut items = items.into_iter();
        let name = match items.next() {
            Some(Value::String(name)) => name,
            Some(_) => {
                return Err(FiddleError::InvalidFrame(
                    "event name must be a string".to_string(),
                ));
            }
            None => return Err(FiddleError::InvalidFrame("empty array".to_string())),
        };
        Self::outgoing(name, items.collect())
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.args.len() + 1))?;
        seq.serialize_element(&self.name)?;
        for arg in &self.args {
            seq.serialize_element(arg)?;
        }
        seq.end()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Returns `true` if `name` belongs to the connection lifecycle.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_EVENTS.contains(&name)
}
