use anyhow::Result;

use crate::cli::output::{StatusInfo, get_formatter};
use crate::models::{Config, IndexDriver, OutputFormat};
use crate::services::create_index;

pub async fn handle_status(format: OutputFormat, _verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let formatter = get_formatter(format);

    let (index_connected, index_records) =
        match create_index(&config.index, config.embedding.dimensions) {
            Ok(index) => {
                let connected = index.health_check().await.unwrap_or(false);
                let records = if connected {
                    index.stats().await.map(|s| s.total_records).unwrap_or(0)
                } else {
                    0
                };
                (connected, records)
            }
            Err(_) => (false, 0),
        };

    let key_present = config
        .embedding
        .api_key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty());

    let status = StatusInfo {
        index_driver: config.index.driver.to_string(),
        index_name: config.index.name.clone(),
        index_connected,
        index_records,
        embedding_model: config.embedding.model.clone(),
        embedding_url: config.embedding.url.clone(),
        embedding_key_present: key_present,
        dimensions: config.embedding.dimensions,
    };

    print!("{}", formatter.format_status(&status));

    if !index_connected || !key_present {
        eprintln!();
        if !index_connected {
            match config.index.driver {
                IndexDriver::Qdrant => {
                    eprintln!(
                        "Warning: Qdrant not reachable. Start with: docker run -p 6334:6334 qdrant/qdrant"
                    );
                }
                IndexDriver::Pinecone => {
                    eprintln!(
                        "Warning: Pinecone index not reachable. Check PINECONE_API_KEY and PINECONE_INDEX_HOST."
                    );
                }
            }
        }
        if !key_present {
            eprintln!("Warning: OPENAI_API_KEY not set. Uploads will fail without it.");
        }
    }

    Ok(())
}
