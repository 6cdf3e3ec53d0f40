//! Router assembly and the serve loop.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::config::ServerConfig;
use crate::error::FiddleError;
use crate::ws::handler::ws_handler;

/// Builds the complete application router for `config`.
pub fn build_app(config: &ServerConfig, state: AppState) -> Router {
    Router::new()
        .merge(api::build_router(config.demo, &config.static_dir))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(config.http_request_timeout))
        .with_state(state)
}

/// Serves the demo selected in `config` on `listener` until `shutdown`
/// resolves.
///
/// On shutdown every session is dropped, so each open connection receives a
/// close frame and reports a server disconnect.
///
/// # Errors
///
/// Returns [`FiddleError::Internal`] if the server fails while accepting
/// connections.
pub async fn run<F>(listener: TcpListener, config: &ServerConfig, shutdown: F) -> Result<(), FiddleError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = AppState::from_config(config);
    let registry = Arc::clone(&state.registry);
    let app = build_app(config, state);

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, demo = %config.demo, "server listening");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            let dropped = registry.clear();
            tracing::info!(sessions = dropped, "shutting down");
        })
        .await
        .map_err(|e| FiddleError::Internal(e.to_string()))
}
