//! Vector index abstraction layer.
//!
//! This module provides a trait-based abstraction over index backends
//! (Pinecone REST data plane, Qdrant) allowing switching based on
//! configuration.

mod pinecone;
mod qdrant;

pub use pinecone::PineconeIndex;
pub use qdrant::QdrantIndex;

use async_trait::async_trait;

use crate::error::VectorIndexError;
use crate::models::{IndexConfig, IndexDriver, UploadRecord};

/// Record count snapshot of an index.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexStats {
    pub total_records: u64,
}

/// Abstract trait for vector index operations.
///
/// Backends take a whole batch in one upsert call; partial writes are
/// never attempted by callers.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Check if the index is reachable.
    async fn health_check(&self) -> Result<bool, VectorIndexError>;

    /// Make sure the target index exists and accepts writes.
    async fn ensure_ready(&self) -> Result<(), VectorIndexError>;

    /// Insert or update a batch of records, keyed by record id.
    async fn upsert(&self, records: Vec<UploadRecord>) -> Result<(), VectorIndexError>;

    /// Read the total record count of the index.
    async fn stats(&self) -> Result<IndexStats, VectorIndexError>;

    /// Index or collection name.
    fn name(&self) -> &str;
}

/// Create an index backend based on configuration.
pub fn create_index(
    config: &IndexConfig,
    dimensions: u64,
) -> Result<Box<dyn VectorIndex>, VectorIndexError> {
    match config.driver {
        IndexDriver::Pinecone => {
            let backend = PineconeIndex::new(config)?;
            Ok(Box::new(backend))
        }
        IndexDriver::Qdrant => {
            let backend = QdrantIndex::new(config, dimensions)?;
            Ok(Box::new(backend))
        }
    }
}
