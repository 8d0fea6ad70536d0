//! Document name sanitisation.
//!
//! User-supplied document names (typically PDF filenames) are used as
//! directory names under the storage root, so they must be reduced to a safe
//! character set first. The mapping is a pure function: the same input always
//! yields the same sanitised name, and two distinct inputs may collide after
//! sanitisation (e.g. names differing only in stripped punctuation).

/// Maps a user-supplied document name to a safe directory name.
///
/// - Strips one trailing `.pdf` extension, case-insensitively.
/// - Keeps ASCII letters, ASCII digits, CJK ideographs (U+4E00–U+9FA5),
///   hyphen and underscore; every other character becomes `_`.
///
/// Never fails: empty or fully-substituted input yields an all-underscore
/// (possibly empty) name.
pub fn sanitize_document_name(name: &str) -> String {
    strip_pdf_extension(name)
        .chars()
        .map(|c| if is_safe_char(c) { c } else { '_' })
        .collect()
}

/// Strips a trailing `.pdf` suffix, case-insensitively, at most once.
fn strip_pdf_extension(name: &str) -> &str {
    let bytes = name.as_bytes();
    if bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf") {
        // The suffix is pure ASCII, so the cut lands on a char boundary.
        &name[..name.len() - 4]
    } else {
        name
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pdf_extension_case_insensitively() {
        assert_eq!(sanitize_document_name("My Notes.pdf"), "My_Notes");
        assert_eq!(sanitize_document_name("report.PDF"), "report");
        assert_eq!(sanitize_document_name("report.Pdf"), "report");
    }

    #[test]
    fn strips_extension_at_most_once() {
        assert_eq!(sanitize_document_name("paper.pdf.pdf"), "paper_pdf");
    }

    #[test]
    fn replaces_unsafe_characters_with_underscore() {
        assert_eq!(sanitize_document_name("a/b.pdf"), "a_b");
        assert_eq!(sanitize_document_name("report v2!!.pdf"), "report_v2__");
        assert_eq!(sanitize_document_name("../../etc/passwd"), "______etc_passwd");
    }

    #[test]
    fn keeps_hyphen_underscore_and_digits() {
        assert_eq!(sanitize_document_name("my-doc_01.pdf"), "my-doc_01");
    }

    #[test]
    fn keeps_cjk_ideographs() {
        assert_eq!(sanitize_document_name("论文 final.pdf"), "论文_final");
    }

    #[test]
    fn is_deterministic() {
        let name = "Über résumé (v3).PDF";
        assert_eq!(sanitize_document_name(name), sanitize_document_name(name));
    }

    #[test]
    fn output_contains_only_safe_characters() {
        for name in ["a b/c\\d.pdf", "läöü.pdf", "名前?.pdf", "", "...."] {
            let sanitized = sanitize_document_name(name);
            assert!(sanitized.chars().all(is_safe_char), "unsafe char in {sanitized:?}");
        }
    }

    #[test]
    fn accepts_empty_and_fully_substituted_input() {
        assert_eq!(sanitize_document_name(""), "");
        assert_eq!(sanitize_document_name("!!!.pdf"), "___");
    }

    #[test]
    fn does_not_split_multibyte_chars_before_short_names() {
        // Names shorter than 4 bytes, or ending in multi-byte chars, must not panic.
        assert_eq!(sanitize_document_name("猫"), "猫");
        assert_eq!(sanitize_document_name("ab"), "ab");
    }
}
