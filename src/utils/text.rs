//! Text normalization utilities.

/// Normalize a source document for line-based parsing.
///
/// Strips a single leading UTF-8 BOM if present and converts CRLF and
/// lone CR line endings to LF so the parser only ever sees `\n`.
pub fn normalize_document(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check whether a line is blank (empty after trimming).
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bom() {
        assert_eq!(normalize_document("\u{feff}hello"), "hello");
        // Only the leading BOM is stripped
        assert_eq!(normalize_document("a\u{feff}b"), "a\u{feff}b");
    }

    #[test]
    fn test_normalizes_line_endings() {
        assert_eq!(normalize_document("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert_eq!(normalize_document("\r\n\r\n"), "\n\n");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(normalize_document("line one\nline two\n"), "line one\nline two\n");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t  "));
        assert!(!is_blank("  x  "));
    }
}
