//! The two demos served by this crate.
//!
//! - [`FiddleHandler`]: announces a fixed payload to every new session.
//! - [`LatencyHandler`]: answers every latency probe with a reply signal.

pub mod fiddle;
pub mod latency;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

pub use fiddle::FiddleHandler;
pub use latency::LatencyHandler;

use crate::error::FiddleError;
use crate::handler::EventHandler;

/// Event the fiddle server emits on connect.
pub const HELLO: &str = "hello";
/// Latency probe sent by clients.
pub const PING_FROM_CLIENT: &str = "ping_from_client";
/// Reply to [`PING_FROM_CLIENT`].
pub const PONG_FROM_SERVER: &str = "pong_from_server";

/// Which demo the server runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// Bidirectional event emission.
    Fiddle,
    /// Round-trip latency measurement.
    Latency,
}

impl Demo {
    /// Builds the event handler for this demo.
    #[must_use]
    pub fn handler(self) -> Arc<dyn EventHandler> {
        match self {
            Self::Fiddle => Arc::new(FiddleHandler),
            Self::Latency => Arc::new(LatencyHandler),
        }
    }

    /// File served at `/`, relative to the static directory.
    #[must_use]
    pub const fn index_file(self) -> &'static str {
        match self {
            Self::Fiddle => "fiddle.html",
            Self::Latency => "latency.html",
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fiddle => f.write_str("fiddle"),
            Self::Latency => f.write_str("latency"),
        }
    }
}

impl FromStr for Demo {
    type Err = FiddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fiddle" => Ok(Self::Fiddle),
            "latency" => Ok(Self::Latency),
            other => Err(FiddleError::Config(format!("unknown demo: {other}"))),
        }
    }
}
