//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::demos::Demo;
use crate::handler::EventHandler;
use crate::session::SessionRegistry;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connected sessions and their outbound queues.
    pub registry: Arc<SessionRegistry>,
    /// Callbacks of the demo being served.
    pub handler: Arc<dyn EventHandler>,
    /// Demo being served.
    pub demo: Demo,
}

impl AppState {
    /// Builds the state for the demo selected in `config`.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new(
                config.outbound_queue_capacity,
                config.max_connections,
            )),
            handler: config.demo.handler(),
            demo: config.demo,
        }
    }
}
