//! Utility modules.

pub mod file;
pub mod id;
pub mod text;

pub use id::generate_record_id;
pub use text::{is_blank, normalize_document};
