//! Character encoding detection and transcoding.
//!
//! Fetched pages arrive as raw bytes; this module detects the charset from
//! the HTTP `Content-Type` label or HTML meta tags and converts to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>]+)"#).expect("valid regex")
});

/// Match `<meta http-equiv="Content-Type" content="...; charset=...">` tag
#[allow(clippy::expect_used)]
static CONTENT_TYPE_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#).expect("valid regex")
});

/// Detect the character encoding for a fetched page.
///
/// Sources, in order:
/// 1. charset label from the HTTP `Content-Type` header, if any
/// 2. `<meta charset="...">`
/// 3. `<meta http-equiv="Content-Type" content="...; charset=...">`
/// 4. UTF-8 (standard web default)
///
/// Only the first 1024 bytes of the body are examined for meta tags.
#[must_use]
pub fn detect_encoding(body: &[u8], header_label: Option<&str>) -> &'static Encoding {
    if let Some(label) = header_label {
        if let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) {
            return encoding;
        }
    }

    let head = &body[..body.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    for pattern in [&CHARSET_META_RE, &CONTENT_TYPE_CHARSET_RE] {
        if let Some(captures) = pattern.captures(&head_str) {
            if let Some(label) = captures.get(1) {
                if let Some(encoding) = Encoding::for_label(label.as_str().as_bytes()) {
                    return encoding;
                }
            }
        }
    }

    UTF_8
}

/// Transcode page bytes to UTF-8.
///
/// Invalid sequences are replaced with the Unicode replacement character
/// rather than causing errors.
#[must_use]
pub fn transcode_to_utf8(body: &[u8], header_label: Option<&str>) -> String {
    let encoding = detect_encoding(body, header_label);
    let (text, _, _) = encoding.decode(body);
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_label_takes_priority() {
        let body = br#"<html><head><meta charset="UTF-8"></head></html>"#;
        let encoding = detect_encoding(body, Some("ISO-8859-1"));
        assert_eq!(encoding.name(), "windows-1252"); // encoding_rs maps latin-1
    }

    #[test]
    fn meta_charset_detected() {
        let body = br#"<html><head><meta charset="ISO-8859-1"></head></html>"#;
        assert_eq!(detect_encoding(body, None).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_charset_detected() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=shift_jis">"#;
        assert_eq!(detect_encoding(body, None).name(), "Shift_JIS");
    }

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<html></html>", None), UTF_8);
        assert_eq!(detect_encoding(b"<html></html>", Some("bogus-charset")), UTF_8);
    }

    #[test]
    fn transcodes_latin1_body() {
        let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
        let text = transcode_to_utf8(body, None);
        assert!(text.contains("Café"));
    }
}
