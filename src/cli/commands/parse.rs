//! Parse command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output::{ParseReport, ParsedEntry, get_formatter};
use crate::models::OutputFormat;
use crate::services::{TemplateParser, count_hyperlinks, extract_hyperlinks};
use crate::utils::file::{file_name_of, read_input};

/// Arguments for the parse command.
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Path to the template document (use - for stdin)
    #[arg()]
    pub file: Option<PathBuf>,

    /// Show the full body of each template instead of a preview
    #[arg(long)]
    pub full: bool,
}

/// Handle the parse command.
pub async fn handle_parse(args: ParseArgs, format: OutputFormat, _verbose: bool) -> Result<()> {
    let formatter = get_formatter(format);

    let input = read_input(args.file.as_deref()).context("failed to read input")?;
    let source = file_name_of(args.file.as_deref()).unwrap_or_else(|| "stdin".to_string());

    let templates = TemplateParser::new().parse(&input);

    let entries = templates
        .iter()
        .enumerate()
        .map(|(i, template)| ParsedEntry {
            index: i + 1,
            title: template.title.clone(),
            character_count: template.content.chars().count(),
            hyperlink_count: count_hyperlinks(&template.raw_content),
            links: extract_hyperlinks(&template.raw_content),
            preview: preview_of(&template.raw_content, args.full),
        })
        .collect();

    let report = ParseReport { source, entries };
    print!("{}", formatter.format_parse_report(&report));

    Ok(())
}

fn preview_of(raw: &str, full: bool) -> String {
    if full {
        return raw.to_string();
    }
    const PREVIEW_CHARS: usize = 80;
    let preview: String = raw.chars().take(PREVIEW_CHARS).collect();
    if raw.chars().count() > PREVIEW_CHARS {
        format!("{}...", preview)
    } else {
        preview
    }
}
