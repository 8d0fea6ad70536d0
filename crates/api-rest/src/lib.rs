//! # API REST
//!
//! REST API for the annotation storage service.
//!
//! Handles:
//! - HTTP endpoints with axum (uploads, notes, health)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, static file service)
//!
//! Storage semantics live in `annot-core`; this crate only validates
//! requests and maps core errors onto HTTP responses.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

pub use error::ApiError;

use std::sync::Arc;

use annot_core::constants::PUBLIC_DATA_MOUNT;
use annot_core::DocumentStore;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Transport-level body cap. Kept well above the per-endpoint limits so the
/// handlers' own size checks decide the response, not the framework default.
const BODY_LIMIT_BYTES: usize = 32 * 1024 * 1024;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::upload_audio,
        handlers::upload_image,
        handlers::save_notes,
        handlers::get_notes,
    ),
    components(schemas(
        handlers::HealthRes,
        handlers::UploadRes,
        handlers::SaveNotesReq,
        handlers::SaveNotesRes,
    ))
)]
struct ApiDoc;

/// Builds the complete application router.
///
/// Stored media is served statically under the same `/pdf_data` prefix the
/// upload responses embed in their URLs, straight off the store's data
/// directory.
pub fn router(state: AppState) -> Router {
    let data_dir = state.store.document_data_dir().to_path_buf();

    Router::new()
        .route("/health", get(handlers::health))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/upload", post(handlers::upload_audio))
        .route("/upload-image", post(handlers::upload_image))
        .route("/save-notes", post(handlers::save_notes))
        .route("/get-notes/:pdfName", get(handlers::get_notes))
        .nest_service(PUBLIC_DATA_MOUNT, ServeDir::new(data_dir))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
