//! Template extraction from quoted-title documents.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ParsedTemplate;
use crate::utils::normalize_document;

// A title line is a whole-line quoted string, optionally preceded by an
// ordinal like "12. ". Each quote style must close with its own pair;
// a curly opener with a straight closer is not a title.
static RE_TITLE_STRAIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:\d+\.\s*)?"([^"]+)"$"#).unwrap());
static RE_TITLE_CURLY_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(?:\d+\.\s*)?“([^"“”]+)”$"#).unwrap());
static RE_TITLE_CURLY_SINGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.\s*)?‘([^‘’]+)’$").unwrap());

/// Line-oriented parser that segments a document into titled templates.
///
/// A template opens with a quoted title line, gates on a `Template:`
/// marker line, and accumulates every following non-blank line until the
/// next title or end of input. Titles that never see a marker, or whose
/// body is empty, are dropped silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateParser;

impl TemplateParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into templates, in order of appearance.
    ///
    /// Parsing never fails; a document with no well-formed templates
    /// yields an empty vector and the caller decides what that means.
    pub fn parse(&self, text: &str) -> Vec<ParsedTemplate> {
        let text = normalize_document(text);

        let mut templates = Vec::new();
        let mut current_title: Option<String> = None;
        let mut content: Vec<&str> = Vec::new();
        let mut collecting = false;

        for raw_line in text.lines() {
            let line = raw_line.trim();

            if let Some(title) = match_title(line) {
                close_out(&mut templates, current_title.take(), &content);
                content.clear();
                collecting = false;
                // A quoted title that trims to nothing opens no template
                current_title = if title.is_empty() { None } else { Some(title) };
                continue;
            }

            if line.eq_ignore_ascii_case("template:") {
                collecting = true;
                continue;
            }

            if collecting && current_title.is_some() && !line.is_empty() {
                content.push(line);
            }
        }

        close_out(&mut templates, current_title.take(), &content);
        templates
    }
}

/// Try all title patterns on a trimmed line, returning the trimmed
/// quoted text on a match.
fn match_title(line: &str) -> Option<String> {
    for re in [&*RE_TITLE_STRAIGHT, &*RE_TITLE_CURLY_DOUBLE, &*RE_TITLE_CURLY_SINGLE] {
        if let Some(caps) = re.captures(line) {
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

/// Emit the open template if it has both a title and a non-empty body.
fn close_out(templates: &mut Vec<ParsedTemplate>, title: Option<String>, lines: &[&str]) {
    let Some(title) = title else {
        return;
    };
    let raw = lines.join("\n");
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    templates.push(ParsedTemplate::new(title, raw.to_string()));
}
