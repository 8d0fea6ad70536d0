//! # Annot Core
//!
//! Core storage logic for the document annotation service.
//!
//! This crate owns the document-scoped storage mapping:
//! - Sanitising user-supplied document names into safe directory names
//! - Resolving (and lazily creating) per-document storage directories
//! - Timestamped, collision-resistant media filenames
//! - Persisting and loading the per-document notes blob
//!
//! **No API concerns**: HTTP endpoints, multipart parsing, and request
//! validation belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod filename;
pub mod sanitize;
pub mod store;

pub use config::CoreConfig;
pub use constants::DEFAULT_DOCUMENT_DATA_DIR;
pub use filename::MediaKind;
pub use sanitize::sanitize_document_name;
pub use store::{DocumentPaths, DocumentStore, StoredMedia};

/// Errors that can occur during document storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create document directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to write media file: {0}")]
    MediaWrite(std::io::Error),
    #[error("failed to write notes file: {0}")]
    NotesWrite(std::io::Error),
    #[error("failed to read notes file: {0}")]
    NotesRead(std::io::Error),
    #[error("failed to serialize notes: {0}")]
    NotesSerialization(serde_json::Error),
    #[error("notes file contains invalid JSON: {0}")]
    NotesParse(serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
