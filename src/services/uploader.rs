//! Sequential embed-and-upsert pipeline for parsed templates.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::UploadError;
use crate::models::{
    ParsedTemplate, TemplateMetadata, UploadRecord, UploadReport, UploadResultEntry,
};
use crate::services::embedding::EmbeddingProvider;
use crate::services::links::count_hyperlinks;
use crate::services::vector_index::VectorIndex;
use crate::utils::generate_record_id;

/// Source label used when the caller does not name the input.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// Pipeline that embeds parsed templates and upserts them as one batch.
///
/// Templates are embedded strictly in input order with a pacing delay
/// between consecutive records; any provider failure aborts the whole
/// batch before anything reaches the index.
pub struct TemplateUploader {
    provider: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    pacing: Duration,
}

impl TemplateUploader {
    pub fn new(
        provider: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        pacing_ms: u64,
    ) -> Self {
        Self {
            provider,
            index,
            pacing: Duration::from_millis(pacing_ms),
        }
    }

    /// Model identifier of the configured embedding provider.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Name of the target index.
    pub fn index_name(&self) -> &str {
        self.index.name()
    }

    /// Upload a batch of templates, returning per-record outcomes.
    ///
    /// An empty batch returns an empty report without touching the
    /// index. The final stats read is observational: when it fails the
    /// report carries `total_vectors: None` and the upload still counts
    /// as successful.
    pub async fn upload(
        &self,
        templates: &[ParsedTemplate],
        source_file: Option<&str>,
    ) -> Result<UploadReport, UploadError> {
        if templates.is_empty() {
            return Ok(UploadReport::new(Vec::new(), None));
        }

        let source_file = source_file.unwrap_or(UNKNOWN_SOURCE);
        let mut records = Vec::with_capacity(templates.len());
        let mut results = Vec::with_capacity(templates.len());

        for (i, template) in templates.iter().enumerate() {
            debug!(title = %template.title, position = i + 1, "embedding template");
            let values = self.provider.embed(&template.content).await?;

            let id = generate_record_id();
            let hyperlink_count = count_hyperlinks(&template.raw_content);
            let metadata =
                TemplateMetadata::from_template(template, i + 1, hyperlink_count, source_file);

            results.push(UploadResultEntry {
                index: i + 1,
                title: template.title.clone(),
                id: id.clone(),
                hyperlink_count,
            });
            records.push(UploadRecord {
                id,
                values,
                metadata,
            });

            // Pace between records, never after the last one
            if i + 1 < templates.len() {
                tokio::time::sleep(self.pacing).await;
            }
        }

        let uploaded = records.len();
        self.index.upsert(records).await?;
        info!(uploaded, index = self.index.name(), "batch upserted");

        let total_vectors = match self.index.stats().await {
            Ok(stats) => Some(stats.total_records),
            Err(e) => {
                warn!(error = %e, "index stats unavailable after upsert");
                None
            }
        };

        Ok(UploadReport::new(results, total_vectors))
    }
}
