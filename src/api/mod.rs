//! Plain HTTP surface: health check and the demo's static pages.

pub mod system;

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::app_state::AppState;
use crate::demos::Demo;

/// Builds the HTTP router (everything except the WebSocket endpoint).
///
/// - `GET /` serves the demo's index page from `static_dir`.
/// - `GET /static/*` serves any file under `static_dir`.
pub fn build_router(demo: Demo, static_dir: &Path) -> Router<AppState> {
    Router::new()
        .merge(system::routes())
        .route_service("/", ServeFile::new(static_dir.join(demo.index_file())))
        .nest_service("/static", ServeDir::new(static_dir))
}
