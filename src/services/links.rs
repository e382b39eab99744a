//! Hyperlink detection and counting.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static RE_MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static RE_BARE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s)]+").unwrap());

/// A Markdown hyperlink with its display label and target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperlink {
    pub label: String,
    pub target: String,
}

/// Count distinct hyperlink targets in a text.
///
/// Markdown `[label](target)` targets are collected first, then bare
/// `http(s)://` URLs. Targets are deduplicated by exact string equality,
/// so a URL appearing both as a Markdown target and as a bare URL counts
/// once. Markdown targets count whether or not they look like URLs.
pub fn count_hyperlinks(text: &str) -> usize {
    let mut targets: HashSet<&str> = HashSet::new();

    for caps in RE_MARKDOWN_LINK.captures_iter(text) {
        if let Some(target) = caps.get(2) {
            targets.insert(target.as_str());
        }
    }

    for m in RE_BARE_URL.find_iter(text) {
        targets.insert(m.as_str());
    }

    targets.len()
}

/// Extract Markdown hyperlinks in document order, duplicates included.
pub fn extract_hyperlinks(text: &str) -> Vec<Hyperlink> {
    RE_MARKDOWN_LINK
        .captures_iter(text)
        .map(|caps| Hyperlink {
            label: caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert_eq!(count_hyperlinks(""), 0);
        assert_eq!(count_hyperlinks("no links here"), 0);
    }

    #[test]
    fn test_markdown_links() {
        assert_eq!(count_hyperlinks("[docs](https://example.com/docs)"), 1);
        assert_eq!(
            count_hyperlinks("[a](https://one.com) and [b](https://two.com)"),
            2
        );
    }

    #[test]
    fn test_bare_urls() {
        assert_eq!(count_hyperlinks("see https://example.com for details"), 1);
        assert_eq!(
            count_hyperlinks("http://a.com then https://b.com/path?q=1"),
            2
        );
    }

    #[test]
    fn test_same_target_counts_once() {
        // Markdown target and bare occurrence of the same URL deduplicate
        assert_eq!(count_hyperlinks("[a](http://x.com) http://x.com"), 1);
    }

    #[test]
    fn test_same_label_different_targets() {
        assert_eq!(
            count_hyperlinks("[here](https://one.com) [here](https://two.com)"),
            2
        );
    }

    #[test]
    fn test_non_url_markdown_target() {
        assert_eq!(count_hyperlinks("[guide](docs/guide.md)"), 1);
    }

    #[test]
    fn test_bare_url_stops_at_whitespace_and_paren() {
        // A trailing parenthesis is not part of the URL
        assert_eq!(count_hyperlinks("(https://example.com) https://example.com"), 1);
    }

    #[test]
    fn test_extract_hyperlinks() {
        let links = extract_hyperlinks("[a](https://one.com) text [b](https://two.com)");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "a");
        assert_eq!(links[0].target, "https://one.com");
        assert_eq!(links[1].label, "b");
        assert_eq!(links[1].target, "https://two.com");
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let links = extract_hyperlinks("[a](https://x.com) [a](https://x.com)");
        assert_eq!(links.len(), 2);
    }
}
