//! Serve command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::models::Config;
use crate::server::HttpServer;
use crate::services::{OpenAiEmbeddings, TemplateUploader, create_index};

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (host:port); overrides the configured address
    #[arg(long, short = 'b')]
    pub bind: Option<String>,
}

/// Handle the serve command.
pub async fn handle_serve(args: ServeArgs) -> Result<()> {
    let config = Config::load()?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let provider = OpenAiEmbeddings::new(&config.embedding)
        .context("failed to initialize embedding provider")?;
    let index = create_index(&config.index, config.embedding.dimensions)
        .context("failed to initialize vector index")?;
    index
        .ensure_ready()
        .await
        .context("vector index is not ready")?;

    let uploader = Arc::new(TemplateUploader::new(
        Arc::new(provider),
        Arc::from(index),
        config.upload.pacing_ms,
    ));

    eprintln!("Serving uploads on http://{}", bind);
    eprintln!("Index: {} ({})", config.index.name, config.index.driver);

    HttpServer::new(bind, uploader).run().await?;
    Ok(())
}
