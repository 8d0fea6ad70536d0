//! Document-scoped storage service implementation.
//!
//! This module provides the core of the annotation service through the
//! [`DocumentStore`] type: a stable mapping from user-supplied document names
//! to per-document storage directories, plus the operations that read and
//! write inside them.
//!
//! # Storage Layout
//!
//! Each document gets its own directory under the configured storage root:
//!
//! ```text
//! <document_data_dir>/
//! └── <sanitized_name>/
//!     ├── notes.json                          # whole-blob annotation state
//!     ├── audio_<timestamp>_<token>.wav       # audio recordings, flat
//!     └── images/
//!         └── image_<timestamp>_<token><ext>  # image attachments
//! ```
//!
//! The public URL scheme mirrors this layout under the `/pdf_data` mount.
//!
//! # Concurrency
//!
//! Directory creation is idempotent and tolerates races between concurrent
//! requests for the same new document. Notes writes go through a temp file
//! and a rename on the same filesystem, so readers observe either the old or
//! the new blob, never a truncated one. There is no inter-request lock: two
//! concurrent notes saves for the same document are last-writer-wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use serde_json::Value;

use crate::config::CoreConfig;
use crate::constants::{AUDIO_FILE_EXT, IMAGES_DIR_NAME, NOTES_FILE_NAME, PUBLIC_DATA_MOUNT};
use crate::filename::{extension_of, media_filename, MediaKind};
use crate::sanitize::sanitize_document_name;
use crate::{StoreError, StoreResult};

/// Resolved filesystem locations for one document.
///
/// Produced by [`DocumentStore::resolve`]; by the time a value of this type
/// exists, the root and images directories exist on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    sanitized_name: String,
    root_dir: PathBuf,
    images_dir: PathBuf,
    notes_file: PathBuf,
}

impl DocumentPaths {
    pub fn sanitized_name(&self) -> &str {
        &self.sanitized_name
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn notes_file(&self) -> &Path {
        &self.notes_file
    }
}

/// A successfully persisted media upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    /// Generated filename on disk.
    pub filename: String,
    /// Public-facing relative URL of the stored file.
    pub url: String,
}

/// Service for managing per-document annotation storage.
///
/// The store is scoped to a single storage root taken from [`CoreConfig`] at
/// construction time. All operations resolve the document directory first,
/// so callers never handle raw paths.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: Arc<CoreConfig>,
}

impl DocumentStore {
    pub fn new(config: Arc<CoreConfig>) -> Self {
        Self { config }
    }

    /// The storage root every document directory lives under.
    pub fn document_data_dir(&self) -> &Path {
        self.config.document_data_dir()
    }

    /// Resolves the storage locations for a document, creating any missing
    /// directory along the way.
    ///
    /// Resolution is deterministic: the same document name always yields the
    /// same paths. Creation is idempotent and safe to race against other
    /// requests for the same document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DirCreation` if a directory cannot be created for
    /// a reason other than already existing (permissions, disk full).
    pub fn resolve(&self, document_name: &str) -> StoreResult<DocumentPaths> {
        let sanitized_name = sanitize_document_name(document_name);
        let root_dir = self.config.document_data_dir().join(&sanitized_name);
        let images_dir = root_dir.join(IMAGES_DIR_NAME);
        let notes_file = root_dir.join(NOTES_FILE_NAME);

        create_dir_idempotent(&root_dir)?;
        create_dir_idempotent(&images_dir)?;

        Ok(DocumentPaths {
            sanitized_name,
            root_dir,
            images_dir,
            notes_file,
        })
    }

    /// Replaces the document's notes blob in full.
    ///
    /// The value is serialised as 2-space-indented JSON and written through a
    /// temp file followed by a rename, so a concurrent reader never sees a
    /// partial write. No merge or patch semantics: last writer wins.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotesSerialization` if the value cannot be
    /// serialised, or `StoreError::NotesWrite` on filesystem failure.
    pub fn save_notes(&self, document_name: &str, notes: &Value) -> StoreResult<()> {
        let paths = self.resolve(document_name)?;
        let body = serde_json::to_vec_pretty(notes).map_err(StoreError::NotesSerialization)?;

        // Unique temp name per write, so concurrent saves cannot clobber
        // each other's in-flight file before the rename.
        let token: u32 = rand::thread_rng().gen();
        let tmp_file = paths
            .root_dir()
            .join(format!(".{}.{:08x}.tmp", NOTES_FILE_NAME, token));

        fs::write(&tmp_file, &body).map_err(StoreError::NotesWrite)?;
        fs::rename(&tmp_file, paths.notes_file()).map_err(|e| {
            let _ = fs::remove_file(&tmp_file);
            StoreError::NotesWrite(e)
        })?;

        tracing::debug!(
            document = paths.sanitized_name(),
            bytes = body.len(),
            "saved notes"
        );
        Ok(())
    }

    /// Loads the document's notes blob.
    ///
    /// A document with no notes file yet yields an empty JSON object; that is
    /// the normal state before the first save, not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotesParse` if the file exists but does not hold
    /// valid JSON — corruption must stay distinguishable from absence — and
    /// `StoreError::NotesRead` on any other read failure.
    pub fn load_notes(&self, document_name: &str) -> StoreResult<Value> {
        let paths = self.resolve(document_name)?;

        let raw = match fs::read_to_string(paths.notes_file()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Value::Object(serde_json::Map::new()))
            }
            Err(e) => return Err(StoreError::NotesRead(e)),
        };

        serde_json::from_str(&raw).map_err(StoreError::NotesParse)
    }

    /// Persists an audio upload into the document's directory.
    ///
    /// Audio files live flat in the document root and always get a `.wav`
    /// extension regardless of the uploaded encoding.
    pub fn store_audio(&self, document_name: &str, data: &[u8]) -> StoreResult<StoredMedia> {
        let paths = self.resolve(document_name)?;
        let filename = media_filename(MediaKind::Audio, AUDIO_FILE_EXT);

        fs::write(paths.root_dir().join(&filename), data).map_err(StoreError::MediaWrite)?;

        let url = format!(
            "{}/{}/{}",
            PUBLIC_DATA_MOUNT,
            paths.sanitized_name(),
            filename
        );
        tracing::debug!(document = paths.sanitized_name(), %url, "stored audio");
        Ok(StoredMedia { filename, url })
    }

    /// Persists an image upload into the document's `images/` directory.
    ///
    /// The original upload's extension is preserved verbatim, case and all;
    /// type validation is the boundary's job, not the namer's.
    pub fn store_image(
        &self,
        document_name: &str,
        original_filename: &str,
        data: &[u8],
    ) -> StoreResult<StoredMedia> {
        let paths = self.resolve(document_name)?;
        let extension = extension_of(original_filename);
        let filename = media_filename(MediaKind::Image, &extension);

        fs::write(paths.images_dir().join(&filename), data).map_err(StoreError::MediaWrite)?;

        let url = format!(
            "{}/{}/{}/{}",
            PUBLIC_DATA_MOUNT,
            paths.sanitized_name(),
            IMAGES_DIR_NAME,
            filename
        );
        tracing::debug!(document = paths.sanitized_name(), %url, "stored image");
        Ok(StoredMedia { filename, url })
    }
}

/// Creates a directory treating "already exists" as success.
///
/// `create_dir_all` can still race against a concurrent creator between its
/// existence check and the mkdir; that race must resolve to success.
fn create_dir_idempotent(dir: &Path) -> StoreResult<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(StoreError::DirCreation(e)),
    }
}
