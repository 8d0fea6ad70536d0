//! Annotation storage service binary.
//!
//! Starts the REST API server that accepts audio/image uploads and notes
//! for named documents and serves the stored media back.
//!
//! # Environment Variables
//! - `ANNOT_REST_ADDR`: Server address (default: "0.0.0.0:3000")
//! - `DOCUMENT_DATA_DIR`: Storage root for document data (default: "pdf_data")
//!
//! # Errors
//! Returns an error if:
//! - the logging/tracing configuration cannot be initialised,
//! - the storage root cannot be created,
//! - the server address cannot be bound, or
//! - the HTTP server fails while running.

use std::path::Path;
use std::sync::Arc;

use annot_core::{CoreConfig, DocumentStore, DEFAULT_DOCUMENT_DATA_DIR};
use api_rest::{router, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("annot_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ANNOT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir =
        std::env::var("DOCUMENT_DATA_DIR").unwrap_or_else(|_| DEFAULT_DOCUMENT_DATA_DIR.into());
    let data_path = Path::new(&data_dir);

    // The static file mount expects the storage root to exist at startup;
    // per-document directories are created lazily.
    std::fs::create_dir_all(data_path)?;

    tracing::info!("-- Starting annotation REST API on {}", addr);
    tracing::info!("-- Document data directory: {}", data_path.display());

    let config = Arc::new(CoreConfig::new(data_path.to_path_buf()));
    let store = Arc::new(DocumentStore::new(config));
    let app = router(AppState { store });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
