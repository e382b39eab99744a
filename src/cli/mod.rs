//! CLI module for the template upload tool.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::models::OutputFormat;

/// Template ingestion CLI for vector index uploads.
#[derive(Debug, Parser)]
#[command(name = "templar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        long,
        short = 'f',
        global = true,
        help = "Output format: text, json, or markdown"
    )]
    pub format: Option<OutputFormat>,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse and upload a template document to the vector index
    Upload(commands::UploadArgs),

    /// Parse a template document and report what would be uploaded
    Parse(commands::ParseArgs),

    /// Serve the upload endpoint over HTTP
    Serve(commands::ServeArgs),

    /// Check embedding provider and vector index status
    Status,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::ConfigCommand),
}

// FromStr for --format is implemented in models::upload
