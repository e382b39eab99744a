mod config;
mod template;
mod upload;

pub use config::{
    Config, DEFAULT_BIND_ADDR, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL, DEFAULT_INDEX_NAME,
    DEFAULT_QDRANT_URL, EmbeddingConfig, IndexConfig, IndexDriver, OutputConfig, ServerConfig,
    UploadConfig,
};
pub use template::{ParsedTemplate, TEMPLATE_TYPE, TemplateMetadata, UPLOAD_FORMAT, UploadRecord};
pub use upload::{
    ErrorResponse, OutputFormat, UploadReport, UploadRequestBody, UploadResponse, UploadResultEntry,
};
