//! Record identifier generation.

use chrono::Utc;
use uuid::Uuid;

/// Generate a fresh upload record id.
///
/// Format: `template_<unix-millis>_<8-hex>`, e.g.
/// `template_1735689600000_a1b2c3d4`. The random suffix makes ids from
/// the same millisecond distinct; nothing is ever derived from content,
/// so re-uploading the same document always inserts new records.
pub fn generate_record_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = hex::encode(&Uuid::new_v4().as_bytes()[..4]);
    format!("template_{}_{}", millis, suffix)
}
