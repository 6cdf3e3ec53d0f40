//! Client side of the demos: a minimal event client and the latency probe.

pub mod probe;
pub mod simple_client;

pub use probe::{LatencyProbe, round_trip, run_probes};
pub use simple_client::SimpleClient;
