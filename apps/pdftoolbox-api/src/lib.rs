//! PDF toolbox API server
//!
//! Provides REST endpoints for:
//! - Document inspection (page count, encryption)
//! - Unlock, lock, merge, and page extraction/reordering
//! - The JSON command envelope of `pdftoolbox-core`
//!
//! Uploads arrive as base64 in JSON bodies; transformations respond with the
//! PDF itself as an attachment.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

pub use config::ApiConfig;
pub use error::ApiError;

/// Build the application router
pub fn router(config: &ApiConfig) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/info", post(handlers::info))
        .route("/api/unlock", post(handlers::unlock))
        .route("/api/lock", post(handlers::lock))
        .route("/api/merge", post(handlers::merge))
        .route("/api/extract", post(handlers::extract))
        .route("/api/process", post(handlers::process))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
