//! Timestamped media filenames.
//!
//! Uploaded media is named `<kind>_<timestamp>_<token><ext>`, where the
//! timestamp has second resolution in local time and the token is a short
//! random hex suffix. The timestamp keeps filenames human-readable and
//! sortable; the token closes the overwrite window between two uploads that
//! land in the same second.

use chrono::{DateTime, Local};
use rand::Rng;

/// Timestamp layout used in media filenames, e.g. `2026-08-07_14-03-22`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// The kind of media being stored, which decides the filename prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Image,
}

impl MediaKind {
    pub fn prefix(self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Image => "image",
        }
    }
}

/// Generates a fresh filename for an upload of the given kind.
///
/// `extension` is appended verbatim and must include its leading dot (or be
/// empty for extensionless files).
pub fn media_filename(kind: MediaKind, extension: &str) -> String {
    let token: u16 = rand::thread_rng().gen();
    filename_at(kind, Local::now(), token, extension)
}

fn filename_at(kind: MediaKind, at: DateTime<Local>, token: u16, extension: &str) -> String {
    format!(
        "{}_{}_{:04x}{}",
        kind.prefix(),
        at.format(TIMESTAMP_FORMAT),
        token,
        extension
    )
}

/// Extracts the extension of an uploaded filename, including the leading dot.
///
/// The extension is preserved verbatim, case included; filenames without one
/// (and dotfiles such as `.hidden`) yield an empty string.
pub fn extension_of(original_filename: &str) -> String {
    std::path::Path::new(original_filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_prefix_timestamp_token_and_extension() {
        let at = Local.with_ymd_and_hms(2026, 8, 7, 9, 5, 3).unwrap();
        assert_eq!(
            filename_at(MediaKind::Audio, at, 0x9f2c, ".wav"),
            "audio_2026-08-07_09-05-03_9f2c.wav"
        );
        assert_eq!(
            filename_at(MediaKind::Image, at, 0x0001, ".PNG"),
            "image_2026-08-07_09-05-03_0001.PNG"
        );
    }

    #[test]
    fn zero_pads_timestamp_fields() {
        let at = Local.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let name = filename_at(MediaKind::Audio, at, 0, ".wav");
        assert_eq!(name, "audio_2026-01-02_03-04-05_0000.wav");
    }

    #[test]
    fn generated_names_carry_kind_prefix_and_extension() {
        let name = media_filename(MediaKind::Audio, ".wav");
        assert!(name.starts_with("audio_"));
        assert!(name.ends_with(".wav"));
    }

    #[test]
    fn extension_is_preserved_verbatim() {
        assert_eq!(extension_of("photo.JPG"), ".JPG");
        assert_eq!(extension_of("scan.webp"), ".webp");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
    }

    #[test]
    fn missing_extension_yields_empty_string() {
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of(".hidden"), "");
        assert_eq!(extension_of(""), "");
    }
}
