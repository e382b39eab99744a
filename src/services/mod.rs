mod embedding;
mod links;
mod parser;
mod uploader;
mod vector_index;

pub use embedding::{EmbeddingProvider, OpenAiEmbeddings};
pub use links::{Hyperlink, count_hyperlinks, extract_hyperlinks};
pub use parser::TemplateParser;
pub use uploader::{TemplateUploader, UNKNOWN_SOURCE};
pub use vector_index::{IndexStats, PineconeIndex, QdrantIndex, VectorIndex, create_index};
