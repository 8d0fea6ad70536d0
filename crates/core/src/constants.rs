//! Constants used throughout the annot core crate.
//!
//! This module contains all path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Default directory for document data storage when no explicit directory is configured.
pub const DEFAULT_DOCUMENT_DATA_DIR: &str = "pdf_data";

/// Filename for the per-document notes blob.
pub const NOTES_FILE_NAME: &str = "notes.json";

/// Directory name for image storage within a document directory.
pub const IMAGES_DIR_NAME: &str = "images";

/// File extension for stored audio. Uploads are assumed to be WAV.
pub const AUDIO_FILE_EXT: &str = ".wav";

/// Public URL prefix under which the document data directory is served.
pub const PUBLIC_DATA_MOUNT: &str = "/pdf_data";
