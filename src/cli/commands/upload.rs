//! Upload command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output::get_formatter;
use crate::models::{Config, OutputFormat};
use crate::services::{OpenAiEmbeddings, TemplateParser, TemplateUploader, create_index};
use crate::utils::file::{file_name_of, read_input};

/// Arguments for the upload command.
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the template document (use - for stdin)
    #[arg()]
    pub file: Option<PathBuf>,

    /// Source name recorded in metadata (defaults to the file name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Parse and validate without uploading anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the upload command.
pub async fn handle_upload(args: UploadArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let input = read_input(args.file.as_deref()).context("failed to read input")?;
    let source_name = args.name.or_else(|| file_name_of(args.file.as_deref()));

    let templates = TemplateParser::new().parse(&input);
    if templates.is_empty() {
        anyhow::bail!("no templates found in input");
    }

    if verbose || args.dry_run {
        println!("Found {} templates to upload", templates.len());
    }

    if args.dry_run {
        println!(
            "{}",
            formatter.format_message(&format!(
                "Dry run: {} templates ready for upload",
                templates.len()
            ))
        );
        return Ok(());
    }

    let provider = OpenAiEmbeddings::new(&config.embedding)
        .context("failed to initialize embedding provider")?;
    let index = create_index(&config.index, config.embedding.dimensions)
        .context("failed to initialize vector index")?;
    index
        .ensure_ready()
        .await
        .context("vector index is not ready")?;

    let uploader = TemplateUploader::new(
        Arc::new(provider),
        Arc::from(index),
        config.upload.pacing_ms,
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Uploading {} templates...", templates.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = uploader.upload(&templates, source_name.as_deref()).await;
    pb.finish_and_clear();
    let report = result.context("upload failed")?;

    print!("{}", formatter.format_upload_report(&report));

    Ok(())
}
