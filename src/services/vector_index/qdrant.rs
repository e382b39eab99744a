//! Qdrant vector index backend.

use std::collections::HashMap;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
};
use uuid::Uuid;

use super::{IndexStats, VectorIndex};
use crate::error::VectorIndexError;
use crate::models::{DEFAULT_QDRANT_URL, IndexConfig, UploadRecord};

/// Qdrant backend storing one collection of template vectors.
pub struct QdrantIndex {
    client: Qdrant,
    collection: String,
    dimensions: u64,
}

impl QdrantIndex {
    /// Create a new Qdrant backend from configuration.
    pub fn new(config: &IndexConfig, dimensions: u64) -> Result<Self, VectorIndexError> {
        let url = config.url.as_deref().unwrap_or(DEFAULT_QDRANT_URL);
        let mut builder = Qdrant::from_url(url);

        if let Some(ref api_key) = config.api_key {
            builder = builder.api_key(api_key.clone());
        }

        let client = builder
            .build()
            .map_err(|e| VectorIndexError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            collection: config.name.clone(),
            dimensions,
        })
    }

    /// Qdrant point ids must be integers or UUIDs, so the record id maps
    /// to a deterministic UUID while the original string rides along in
    /// the payload as `record_id`.
    fn point_id(record_id: &str) -> String {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, record_id.as_bytes()).to_string()
    }

    fn is_missing_collection(message: &str) -> bool {
        message.contains("not found") || message.contains("doesn't exist")
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn health_check(&self) -> Result<bool, VectorIndexError> {
        self.client
            .health_check()
            .await
            .map(|_| true)
            .map_err(|e| VectorIndexError::ConnectionError(e.to_string()))
    }

    async fn ensure_ready(&self) -> Result<(), VectorIndexError> {
        match self.client.collection_info(&self.collection).await {
            Ok(_) => Ok(()),
            Err(e) => {
                let msg = e.to_string();
                if !Self::is_missing_collection(&msg) {
                    return Err(VectorIndexError::IndexError(msg));
                }

                let create = CreateCollectionBuilder::new(&self.collection).vectors_config(
                    VectorParamsBuilder::new(self.dimensions, Distance::Cosine),
                );
                self.client
                    .create_collection(create)
                    .await
                    .map_err(|e| VectorIndexError::IndexError(e.to_string()))?;
                Ok(())
            }
        }
    }

    async fn upsert(&self, records: Vec<UploadRecord>) -> Result<(), VectorIndexError> {
        if records.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = records
            .into_iter()
            .map(|record| {
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("record_id".to_string(), record.id.clone().into());

                let meta = record.metadata;
                payload.insert("title".to_string(), meta.title.into());
                payload.insert("content".to_string(), meta.content.into());
                payload.insert("raw_content".to_string(), meta.raw_content.into());
                payload.insert("chunk_id".to_string(), meta.chunk_id.into());
                payload.insert(
                    "character_count".to_string(),
                    (meta.character_count as i64).into(),
                );
                payload.insert(
                    "hyperlink_count".to_string(),
                    (meta.hyperlink_count as i64).into(),
                );
                payload.insert("template_type".to_string(), meta.template_type.into());
                payload.insert("source_file".to_string(), meta.source_file.into());
                payload.insert("format".to_string(), meta.format.into());
                payload.insert("created_at".to_string(), meta.created_at.into());

                PointStruct::new(Self::point_id(&record.id), record.values, payload)
            })
            .collect();

        let upsert = UpsertPointsBuilder::new(&self.collection, points);

        self.client
            .upsert_points(upsert)
            .await
            .map_err(|e| VectorIndexError::UpsertError(e.to_string()))?;

        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats, VectorIndexError> {
        match self.client.collection_info(&self.collection).await {
            Ok(info) => Ok(IndexStats {
                total_records: info.result.map_or(0, |r| r.points_count.unwrap_or(0)),
            }),
            Err(e) => {
                let msg = e.to_string();
                if Self::is_missing_collection(&msg) {
                    Ok(IndexStats::default())
                } else {
                    Err(VectorIndexError::StatsError(msg))
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id_is_deterministic() {
        let a = QdrantIndex::point_id("template_1735689600000_a1b2c3d4");
        let b = QdrantIndex::point_id("template_1735689600000_a1b2c3d4");
        assert_eq!(a, b);
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_point_id_differs_per_record() {
        let a = QdrantIndex::point_id("template_1_aa");
        let b = QdrantIndex::point_id("template_1_ab");
        assert_ne!(a, b);
    }
}
