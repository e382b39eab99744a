use serde::{Deserialize, Serialize};

/// Metadata constant identifying records written by this pipeline.
pub const TEMPLATE_TYPE: &str = "n8n_upload";

/// Storage format tag carried on every record and API response.
pub const UPLOAD_FORMAT: &str = "markdown";

/// A template extracted from a source document.
///
/// `content` is the canonical rendered form derived from `title` and
/// `raw_content`; the three fields never change after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTemplate {
    pub title: String,
    pub content: String,
    pub raw_content: String,
}

impl ParsedTemplate {
    pub fn new(title: String, raw_content: String) -> Self {
        let content = Self::render(&title, &raw_content);
        Self {
            title,
            content,
            raw_content,
        }
    }

    /// Render the canonical Markdown form of a template.
    ///
    /// The layout is fixed and byte-reproducible: bolded quoted title,
    /// blank line, bolded `Template:` marker, blank line, raw body.
    /// Straight double quotes are used regardless of the quote style the
    /// title was authored with.
    pub fn render(title: &str, raw_content: &str) -> String {
        format!("**\"{}\"**\n\n**Template:**\n\n{}", title, raw_content)
    }
}

/// Metadata stored alongside each vector in the index.
///
/// The key set is fixed; downstream search filters rely on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    pub title: String,
    pub content: String,
    pub raw_content: String,
    pub chunk_id: String,
    pub character_count: usize,
    pub hyperlink_count: usize,
    pub template_type: String,
    pub source_file: String,
    pub format: String,
    pub created_at: String,
}

impl TemplateMetadata {
    /// Position label within one upload batch, 1-indexed and zero-padded
    /// to three digits (`chunk_001`, `chunk_002`, ...).
    pub fn chunk_id(chunk_number: usize) -> String {
        format!("chunk_{:03}", chunk_number)
    }

    /// Assemble the metadata for a template at the given 1-indexed batch
    /// position. `created_at` is stamped here, at assembly time.
    pub fn from_template(
        template: &ParsedTemplate,
        chunk_number: usize,
        hyperlink_count: usize,
        source_file: &str,
    ) -> Self {
        Self {
            title: template.title.clone(),
            content: template.content.clone(),
            raw_content: template.raw_content.clone(),
            chunk_id: Self::chunk_id(chunk_number),
            character_count: template.content.chars().count(),
            hyperlink_count,
            template_type: TEMPLATE_TYPE.to_string(),
            source_file: source_file.to_string(),
            format: UPLOAD_FORMAT.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// One embedded template ready for upsert.
#[derive(Debug, Clone, Serialize)]
pub struct UploadRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: TemplateMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exact_bytes() {
        let rendered = ParsedTemplate::render("Example", "Line one");
        assert_eq!(rendered, "**\"Example\"**\n\n**Template:**\n\nLine one");
    }

    #[test]
    fn test_render_multiline_body() {
        let rendered = ParsedTemplate::render("T", "a\nb");
        assert_eq!(rendered, "**\"T\"**\n\n**Template:**\n\na\nb");
    }

    #[test]
    fn test_new_derives_content() {
        let t = ParsedTemplate::new("Greeting".to_string(), "Hello there".to_string());
        assert_eq!(t.content, ParsedTemplate::render(&t.title, &t.raw_content));
    }

    #[test]
    fn test_chunk_id_padding() {
        assert_eq!(TemplateMetadata::chunk_id(1), "chunk_001");
        assert_eq!(TemplateMetadata::chunk_id(12), "chunk_012");
        assert_eq!(TemplateMetadata::chunk_id(123), "chunk_123");
        assert_eq!(TemplateMetadata::chunk_id(1234), "chunk_1234");
    }

    #[test]
    fn test_metadata_assembly() {
        let t = ParsedTemplate::new("Welcome".to_string(), "Hi [a](http://x.com)".to_string());
        let meta = TemplateMetadata::from_template(&t, 1, 1, "welcome.md");
        assert_eq!(meta.title, "Welcome");
        assert_eq!(meta.chunk_id, "chunk_001");
        assert_eq!(meta.character_count, t.content.chars().count());
        assert_eq!(meta.hyperlink_count, 1);
        assert_eq!(meta.template_type, TEMPLATE_TYPE);
        assert_eq!(meta.format, UPLOAD_FORMAT);
        assert_eq!(meta.source_file, "welcome.md");
        assert!(!meta.created_at.is_empty());
    }

    #[test]
    fn test_metadata_character_count_is_chars() {
        let t = ParsedTemplate::new("Résumé".to_string(), "naïve café".to_string());
        let meta = TemplateMetadata::from_template(&t, 2, 0, "unknown");
        assert_eq!(meta.character_count, t.content.chars().count());
        assert!(meta.character_count < t.content.len());
    }
}
