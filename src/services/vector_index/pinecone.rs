//! Pinecone vector index backend (REST data plane).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{IndexStats, VectorIndex};
use crate::error::VectorIndexError;
use crate::models::{IndexConfig, UploadRecord};

/// Pinecone backend talking directly to an index host.
///
/// The index itself is provisioned out of band; this client only ever
/// writes vectors and reads stats over the data-plane API.
pub struct PineconeIndex {
    client: Client,
    host: String,
    name: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<UploadRecord>,
}

#[derive(Debug, Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount")]
    upserted_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(rename = "totalRecordCount", alias = "totalVectorCount", default)]
    total_record_count: u64,
}

impl PineconeIndex {
    /// Create a new Pinecone backend from configuration.
    pub fn new(config: &IndexConfig) -> Result<Self, VectorIndexError> {
        let host = config
            .url
            .as_deref()
            .map(|h| h.trim_end_matches('/'))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                VectorIndexError::ConnectionError(
                    "pinecone index host is not configured".to_string(),
                )
            })?;
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                VectorIndexError::ConnectionError("PINECONE_API_KEY is not set".to_string())
            })?;

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|_| VectorIndexError::ConnectionError("invalid API key value".to_string()))?;
        headers.insert("Api-Key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()
            .map_err(|e| VectorIndexError::ConnectionError(e.to_string()))?;

        // The console hands out bare hostnames
        let host = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };

        Ok(Self {
            client,
            host,
            name: config.name.clone(),
        })
    }

    /// Get the index host URL.
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn health_check(&self) -> Result<bool, VectorIndexError> {
        self.stats().await.map(|_| true)
    }

    async fn ensure_ready(&self) -> Result<(), VectorIndexError> {
        // A stats read proves the host, key and index all line up
        self.stats().await.map(|_| ())
    }

    async fn upsert(&self, records: Vec<UploadRecord>) -> Result<(), VectorIndexError> {
        if records.is_empty() {
            return Ok(());
        }

        let expected = records.len() as u64;
        let url = format!("{}/vectors/upsert", self.host);
        let request = UpsertRequest { vectors: records };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| VectorIndexError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorIndexError::UpsertError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: UpsertResponse = response
            .json()
            .await
            .map_err(|e| VectorIndexError::UpsertError(e.to_string()))?;

        if let Some(count) = parsed.upserted_count
            && count != expected
        {
            return Err(VectorIndexError::UpsertError(format!(
                "index accepted {} of {} records",
                count, expected
            )));
        }

        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats, VectorIndexError> {
        let url = format!("{}/describe_index_stats", self.host);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| VectorIndexError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(VectorIndexError::StatsError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: StatsResponse = response
            .json()
            .await
            .map_err(|e| VectorIndexError::StatsError(e.to_string()))?;

        Ok(IndexStats {
            total_records: parsed.total_record_count,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
