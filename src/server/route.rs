use super::{handlers, AppState};
use axum::routing::any;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, instrument};

/// Routes of the lobby service. Paths other than `/`, `/join` and `/leave`
/// are looked up in `assets_dir`.
#[instrument(skip(state, assets_dir))]
pub fn create_router(state: AppState, assets_dir: impl AsRef<Path>) -> Router {
    let assets_dir = assets_dir.as_ref();
    debug!(assets_dir = %assets_dir.display(), "Creating lobby routes");
    let assets = ServeDir::new(assets_dir);

    Router::new()
        .route("/", any(handlers::status))
        .route("/join", any(handlers::join))
        .route("/leave", any(handlers::leave))
        .nest_service("/assets", assets.clone())
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
