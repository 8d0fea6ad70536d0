//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    document_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `document_data_dir` is the storage root under which every document
    /// directory lives. It does not have to exist yet; directories are
    /// created lazily on first access.
    pub fn new(document_data_dir: PathBuf) -> Self {
        Self { document_data_dir }
    }

    pub fn document_data_dir(&self) -> &Path {
        &self.document_data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reports_configured_dir() {
        let cfg = CoreConfig::new(PathBuf::from("/tmp/annot-data"));
        assert_eq!(cfg.document_data_dir(), Path::new("/tmp/annot-data"));
    }
}
