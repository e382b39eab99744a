//! Upload reports and HTTP wire models.

use serde::{Deserialize, Serialize};

use super::template::UPLOAD_FORMAT;

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Machine-parseable JSON format
    Json,
    /// Documentation-friendly Markdown format
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Outcome of one uploaded template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResultEntry {
    /// 1-based position within the batch
    pub index: usize,

    /// Template title
    pub title: String,

    /// Record id assigned at upload time
    pub id: String,

    /// Distinct hyperlink targets in the raw body
    pub hyperlink_count: usize,
}

/// Outcome of one upload batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReport {
    /// Number of templates upserted
    pub uploaded: usize,

    /// Total records in the index after the upsert, when the index
    /// reported it. `None` means the stats read failed or was skipped;
    /// the upload itself still succeeded.
    pub total_vectors: Option<u64>,

    /// Per-template outcomes, in batch order
    pub results: Vec<UploadResultEntry>,

    /// When the batch finished
    pub timestamp: String,
}

impl UploadReport {
    pub fn new(results: Vec<UploadResultEntry>, total_vectors: Option<u64>) -> Self {
        Self {
            uploaded: results.len(),
            total_vectors,
            results,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Summary line shown to users and returned by the HTTP endpoint.
    pub fn message(&self) -> String {
        format!("Uploaded {} templates in {} format", self.uploaded, UPLOAD_FORMAT)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Body of `POST /api/upload`.
///
/// Exactly one of `file_content` and `file_base64` must be set;
/// `file_base64` carries standard base64 of UTF-8 text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadRequestBody {
    pub file_content: Option<String>,
    pub file_base64: Option<String>,
    pub file_name: Option<String>,
}

/// Success body of `POST /api/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub uploaded: usize,
    #[serde(rename = "totalVectors", default, skip_serializing_if = "Option::is_none")]
    pub total_vectors: Option<u64>,
    pub format: String,
    pub results: Vec<UploadResultEntry>,
    pub timestamp: String,
}

impl UploadResponse {
    pub fn from_report(report: UploadReport) -> Self {
        Self {
            success: true,
            message: report.message(),
            uploaded: report.uploaded,
            total_vectors: report.total_vectors,
            format: UPLOAD_FORMAT.to_string(),
            results: report.results,
            timestamp: report.timestamp,
        }
    }
}

/// Error body shared by every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "md".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_message() {
        let report = UploadReport::new(
            vec![
                UploadResultEntry {
                    index: 1,
                    title: "A".to_string(),
                    id: "template_1_aa".to_string(),
                    hyperlink_count: 0,
                },
                UploadResultEntry {
                    index: 2,
                    title: "B".to_string(),
                    id: "template_1_bb".to_string(),
                    hyperlink_count: 2,
                },
            ],
            Some(42),
        );

        assert_eq!(report.uploaded, 2);
        assert_eq!(report.message(), "Uploaded 2 templates in markdown format");
        assert!(!report.is_empty());
    }

    #[test]
    fn test_empty_report() {
        let report = UploadReport::new(vec![], None);
        assert_eq!(report.uploaded, 0);
        assert!(report.is_empty());
    }

    #[test]
    fn test_request_body_camel_case() {
        let body: UploadRequestBody =
            serde_json::from_str(r#"{"fileContent": "x", "fileName": "f.md"}"#).unwrap();
        assert_eq!(body.file_content.as_deref(), Some("x"));
        assert!(body.file_base64.is_none());
        assert_eq!(body.file_name.as_deref(), Some("f.md"));

        let empty: UploadRequestBody = serde_json::from_str("{}").unwrap();
        assert!(empty.file_content.is_none());
    }

    #[test]
    fn test_response_serialization() {
        let report = UploadReport::new(
            vec![UploadResultEntry {
                index: 1,
                title: "T".to_string(),
                id: "template_1_cc".to_string(),
                hyperlink_count: 1,
            }],
            Some(7),
        );
        let json = serde_json::to_value(UploadResponse::from_report(report)).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["totalVectors"], 7);
        assert_eq!(json["format"], "markdown");
        assert_eq!(json["results"][0]["index"], 1);
        assert_eq!(json["results"][0]["hyperlink_count"], 1);
    }

    #[test]
    fn test_response_omits_missing_total() {
        let report = UploadReport::new(vec![], None);
        let json = serde_json::to_value(UploadResponse::from_report(report)).unwrap();
        assert!(json.get("totalVectors").is_none());
    }

    #[test]
    fn test_error_response() {
        let json = serde_json::to_value(ErrorResponse::new("No content provided")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No content provided");
    }
}
