//! Request payload validation.
//!
//! Pure functions mapping raw payloads to validated structures. Every
//! violated constraint is collected into one `DomainError::Validation`
//! rather than failing on the first.

use uuid::Uuid;

use crate::domain::errors::{DomainError, Result};

pub const MAX_FILENAME_LEN: usize = 255;

#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    pub filename: String,
    pub content: String,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedAsk {
    pub document_id: Uuid,
    pub question: String,
}

pub fn validate_upload(
    filename: &str,
    content: &str,
    content_type: Option<&str>,
    max_content_bytes: usize,
) -> Result<ValidatedUpload> {
    let mut violations = Vec::new();

    let filename = filename.trim();
    if filename.is_empty() {
        violations.push("filename must not be empty".to_string());
    } else if filename.len() > MAX_FILENAME_LEN {
        violations.push(format!(
            "filename must be at most {} characters",
            MAX_FILENAME_LEN
        ));
    }

    if content.trim().is_empty() {
        violations.push("content must not be empty".to_string());
    } else if content.len() > max_content_bytes {
        violations.push(format!(
            "content exceeds maximum size of {} bytes",
            max_content_bytes
        ));
    }

    if !violations.is_empty() {
        return Err(DomainError::Validation(violations));
    }

    Ok(ValidatedUpload {
        filename: filename.to_string(),
        content: content.to_string(),
        content_type: content_type.unwrap_or("text/plain").to_string(),
    })
}

pub fn validate_ask(document_id: &str, question: &str) -> Result<ValidatedAsk> {
    let mut violations = Vec::new();

    let document_id = match Uuid::parse_str(document_id.trim()) {
        Ok(id) => Some(id),
        Err(_) => {
            violations.push("document_id must be a valid UUID".to_string());
            None
        }
    };

    if question.trim().is_empty() {
        violations.push("question must not be empty".to_string());
    }

    match document_id {
        Some(document_id) if violations.is_empty() => Ok(ValidatedAsk {
            document_id,
            question: question.trim().to_string(),
        }),
        _ => Err(DomainError::Validation(violations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_upload() {
        let upload = validate_upload("a.txt", "hello", None, 1024).unwrap();
        assert_eq!(upload.filename, "a.txt");
        assert_eq!(upload.content_type, "text/plain");
    }

    #[test]
    fn test_upload_collects_every_violation() {
        let err = validate_upload("", "", None, 1024).unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert!(violations[0].contains("filename"));
                assert!(violations[1].contains("content"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_rejects_oversized_content() {
        let err = validate_upload("a.txt", "0123456789", None, 4).unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].contains("maximum size"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_upload_rejects_overlong_filename() {
        let name = "x".repeat(MAX_FILENAME_LEN + 1);
        let err = validate_upload(&name, "hi", None, 1024).unwrap_err();
        assert!(matches!(err, DomainError::Validation(v) if v.len() == 1));
    }

    #[test]
    fn test_valid_ask() {
        let id = Uuid::new_v4();
        let ask = validate_ask(&id.to_string(), "  why?  ").unwrap();
        assert_eq!(ask.document_id, id);
        assert_eq!(ask.question, "why?");
    }

    #[test]
    fn test_ask_collects_every_violation() {
        let err = validate_ask("not-a-uuid", "   ").unwrap_err();
        match err {
            DomainError::Validation(violations) => {
                assert_eq!(violations.len(), 2);
                assert!(violations[0].contains("document_id"));
                assert!(violations[1].contains("question"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
