//! Error types for the template upload pipeline.

use thiserror::Error;

/// Errors related to embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to connect to embedding provider: {0}")]
    ConnectionError(String),

    #[error("embedding provider error: {0}")]
    ProviderError(String),

    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("embedding timeout")]
    Timeout,
}

/// Errors related to vector index operations.
#[derive(Debug, Error)]
pub enum VectorIndexError {
    #[error("failed to connect to vector index: {0}")]
    ConnectionError(String),

    #[error("index error: {0}")]
    IndexError(String),

    #[error("upsert error: {0}")]
    UpsertError(String),

    #[error("stats error: {0}")]
    StatsError(String),

    #[error("index client error: {0}")]
    ClientError(String),
}

/// Errors related to the upload pipeline.
///
/// Any failure aborts the whole batch: nothing is upserted and nothing
/// is retried. The caller decides whether to re-run the upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index error: {0}")]
    VectorIndex(#[from] VectorIndexError),
}

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("server error: {0}")]
    Server(String),

    #[error("{0}")]
    Other(String),
}
