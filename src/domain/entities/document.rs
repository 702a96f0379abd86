use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Processing state of an uploaded document.
///
/// Transitions are monotonic: `Uploaded` may advance to `Processed` or
/// `Failed`; the terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Uploaded,
    Processed,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "uploaded" => Some(Self::Uploaded),
            "processed" => Some(Self::Processed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        match self {
            Self::Uploaded => matches!(next, Self::Processed | Self::Failed),
            Self::Processed | Self::Failed => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub filename: String,
    pub content_ref: String,
    pub content_type: String,
    pub status: DocumentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(filename: impl Into<String>, content_ref: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.into(),
            content_ref: content_ref.into(),
            content_type: "text/plain".to_string(),
            status: DocumentStatus::Uploaded,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub content_type: &'static str,
}

/// Extracts the text of an uploaded file. Plain-text formats are decoded as
/// UTF-8; anything else is rejected before a document record is created.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<ExtractedText, DomainError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let content_type = match extension.as_str() {
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        _ => {
            return Err(DomainError::validation(
                "unsupported file type; use TXT, MD, CSV, or JSON files",
            ))
        }
    };

    let text = std::str::from_utf8(bytes)
        .map_err(|_| DomainError::validation("file content is not valid UTF-8"))?
        .trim()
        .to_string();

    if text.is_empty() {
        return Err(DomainError::validation(
            "could not extract text from the uploaded file",
        ));
    }

    Ok(ExtractedText { text, content_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_starts_uploaded() {
        let doc = Document::new("report.txt", "blobs/report.txt");
        assert_eq!(doc.status, DocumentStatus::Uploaded);
        assert_eq!(doc.content_type, "text/plain");
        assert!(doc.updated_at.is_none());
    }

    #[test]
    fn test_status_transitions_are_monotonic() {
        assert!(DocumentStatus::Uploaded.can_transition_to(DocumentStatus::Processed));
        assert!(DocumentStatus::Uploaded.can_transition_to(DocumentStatus::Failed));
        assert!(!DocumentStatus::Processed.can_transition_to(DocumentStatus::Uploaded));
        assert!(!DocumentStatus::Processed.can_transition_to(DocumentStatus::Failed));
        assert!(!DocumentStatus::Failed.can_transition_to(DocumentStatus::Processed));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            DocumentStatus::Uploaded,
            DocumentStatus::Processed,
            DocumentStatus::Failed,
        ] {
            assert_eq!(DocumentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DocumentStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let value = serde_json::to_value(DocumentStatus::Processed).unwrap();
        assert_eq!(value, serde_json::json!("processed"));
    }

    #[test]
    fn test_extracts_plain_text() {
        let extracted = extract_text("notes.txt", b"  hello world \n").unwrap();
        assert_eq!(extracted.text, "hello world");
        assert_eq!(extracted.content_type, "text/plain");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let extracted = extract_text("README.MD", b"# title").unwrap();
        assert_eq!(extracted.content_type, "text/markdown");
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let err = extract_text("scan.pdf", b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_rejects_missing_extension() {
        assert!(extract_text("noext", b"text").is_err());
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let err = extract_text("notes.txt", &[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_rejects_whitespace_only_content() {
        assert!(extract_text("notes.txt", b"   \n\t ").is_err());
    }
}
