//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The landing page is a static build hosted anywhere; it posts service
//! requests to `/api/send-service-request`, so CORS is left open. When
//! `WEBSITE_DIR` points at that build, it is also served from here for every
//! path no API route claims.

pub mod relay;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const RELAY_PATH: &str = "/api/send-service-request";

/// API routes plus the optional static site fallback.
pub fn app(state: AppState, website_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route(
            RELAY_PATH,
            post(relay::send_service_request).fallback(relay::method_not_allowed),
        )
        .route("/healthz", get(healthz));

    match website_dir {
        Some(dir) if dir.is_dir() => {
            tracing::info!(dir = %dir.display(), "serving website");
            router = router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
        }
        Some(dir) => tracing::warn!(dir = %dir.display(), "WEBSITE_DIR is not a directory; static site disabled"),
        None => {}
    }

    router
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
