use std::fmt::Write as FmtWrite;

use crate::models::{OutputFormat, UploadReport};
use crate::services::Hyperlink;

pub trait Formatter {
    fn format_upload_report(&self, report: &UploadReport) -> String;
    fn format_parse_report(&self, report: &ParseReport) -> String;
    fn format_status(&self, status: &StatusInfo) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

/// One parsed template as shown by the parse command.
#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub index: usize,
    pub title: String,
    pub character_count: usize,
    pub hyperlink_count: usize,
    pub links: Vec<Hyperlink>,
    pub preview: String,
}

/// Outcome of a parse-only run.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub source: String,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub struct StatusInfo {
    pub index_driver: String,
    pub index_name: String,
    pub index_connected: bool,
    pub index_records: u64,
    pub embedding_model: String,
    pub embedding_url: String,
    pub embedding_key_present: bool,
    pub dimensions: u64,
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_upload_report(&self, report: &UploadReport) -> String {
        let mut output = String::new();
        writeln!(output, "Upload Complete").unwrap();
        writeln!(output, "---------------").unwrap();
        writeln!(output, "Uploaded: {} templates", report.uploaded).unwrap();
        match report.total_vectors {
            Some(total) => writeln!(output, "Total vectors: {}", total).unwrap(),
            None => writeln!(output, "Total vectors: unavailable").unwrap(),
        }
        writeln!(output).unwrap();

        for entry in &report.results {
            writeln!(output, "{}. {}", entry.index, entry.title).unwrap();
            writeln!(output, "   ID: {}", entry.id).unwrap();
            writeln!(output, "   Links: {}", entry.hyperlink_count).unwrap();
        }

        output
    }

    fn format_parse_report(&self, report: &ParseReport) -> String {
        if report.entries.is_empty() {
            return format!("No templates found in: {}\n", report.source);
        }

        let mut output = String::new();
        writeln!(output, "Parsed {} templates from: {}", report.entries.len(), report.source)
            .unwrap();
        writeln!(output).unwrap();

        for entry in &report.entries {
            writeln!(output, "{}. {}", entry.index, entry.title).unwrap();
            writeln!(
                output,
                "   Characters: {}  Links: {}",
                entry.character_count, entry.hyperlink_count
            )
            .unwrap();
            for link in &entry.links {
                writeln!(output, "   Link: {} ({})", link.label, link.target).unwrap();
            }
            for line in entry.preview.lines() {
                writeln!(output, "   {}", line).unwrap();
            }
            writeln!(output).unwrap();
        }

        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();

        let key_status = if status.embedding_key_present {
            "[SET]"
        } else {
            "[MISSING]"
        };
        writeln!(output, "Embedding:     {}", status.embedding_model).unwrap();
        writeln!(output, "  URL:         {}", status.embedding_url).unwrap();
        writeln!(output, "  Dimensions:  {}", status.dimensions).unwrap();
        writeln!(output, "  API key:     {}", key_status).unwrap();
        writeln!(output).unwrap();

        let index_status = if status.index_connected {
            "[CONNECTED]"
        } else {
            "[DISCONNECTED]"
        };
        writeln!(
            output,
            "Vector Index:  {} ({})",
            status.index_driver, index_status
        )
        .unwrap();
        writeln!(output, "  Name:        {}", status.index_name).unwrap();
        if status.index_connected {
            writeln!(output, "  Records:     {}", status.index_records).unwrap();
        }

        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format_upload_report(&self, report: &UploadReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        }
    }

    fn format_parse_report(&self, report: &ParseReport) -> String {
        let entries: Vec<serde_json::Value> = report
            .entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "index": e.index,
                    "title": e.title,
                    "character_count": e.character_count,
                    "hyperlink_count": e.hyperlink_count,
                    "links": &e.links,
                })
            })
            .collect();

        let json = serde_json::json!({
            "source": report.source,
            "templates": entries,
        });

        if self.pretty {
            serde_json::to_string_pretty(&json).unwrap()
        } else {
            serde_json::to_string(&json).unwrap()
        }
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let json = serde_json::json!({
            "embedding": {
                "model": status.embedding_model,
                "url": status.embedding_url,
                "dimensions": status.dimensions,
                "api_key_present": status.embedding_key_present,
            },
            "index": {
                "driver": status.index_driver,
                "name": status.index_name,
                "connected": status.index_connected,
                "records": status.index_records,
            }
        });

        if self.pretty {
            serde_json::to_string_pretty(&json).unwrap()
        } else {
            serde_json::to_string(&json).unwrap()
        }
    }

    fn format_message(&self, message: &str) -> String {
        serde_json::json!({"message": message}).to_string()
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({"error": error}).to_string()
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_upload_report(&self, report: &UploadReport) -> String {
        let mut output = String::new();
        writeln!(output, "## Upload Complete\n").unwrap();
        writeln!(output, "**Uploaded:** {} templates\n", report.uploaded).unwrap();
        if let Some(total) = report.total_vectors {
            writeln!(output, "**Total vectors:** {}\n", total).unwrap();
        }
        writeln!(output, "| # | Title | ID | Links |").unwrap();
        writeln!(output, "|---|-------|----|-------|").unwrap();
        for entry in &report.results {
            writeln!(
                output,
                "| {} | {} | `{}` | {} |",
                entry.index, entry.title, entry.id, entry.hyperlink_count
            )
            .unwrap();
        }
        output
    }

    fn format_parse_report(&self, report: &ParseReport) -> String {
        if report.entries.is_empty() {
            return format!("## No templates found\n\nSource: `{}`\n", report.source);
        }

        let mut output = String::new();
        writeln!(output, "## Parsed Templates\n").unwrap();
        writeln!(output, "**Source:** `{}`\n", report.source).unwrap();
        writeln!(output, "| # | Title | Characters | Links |").unwrap();
        writeln!(output, "|---|-------|------------|-------|").unwrap();
        for entry in &report.entries {
            writeln!(
                output,
                "| {} | {} | {} | {} |",
                entry.index, entry.title, entry.character_count, entry.hyperlink_count
            )
            .unwrap();
        }
        output
    }

    fn format_status(&self, status: &StatusInfo) -> String {
        let mut output = String::new();
        writeln!(output, "## Status\n").unwrap();

        let key_status = if status.embedding_key_present {
            "✅"
        } else {
            "❌"
        };
        writeln!(output, "### Embedding\n").unwrap();
        writeln!(output, "- **Model:** {}", status.embedding_model).unwrap();
        writeln!(output, "- **URL:** `{}`", status.embedding_url).unwrap();
        writeln!(output, "- **Dimensions:** {}", status.dimensions).unwrap();
        writeln!(output, "- **API key:** {}", key_status).unwrap();
        writeln!(output).unwrap();

        let index_status = if status.index_connected { "✅" } else { "❌" };
        writeln!(
            output,
            "### Vector Index ({}) {}\n",
            status.index_driver, index_status
        )
        .unwrap();
        writeln!(output, "- **Name:** {}", status.index_name).unwrap();
        writeln!(output, "- **Records:** {}", status.index_records).unwrap();

        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("> {}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("> ⚠️ **Error:** {}\n", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}
