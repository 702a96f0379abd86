use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::validation;
use crate::domain::{
    extract_text,
    ports::{ContentStorage, DocumentStore, QuestionStore},
    Document, DocumentStatus, DomainError,
};

pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    questions: Arc<dyn QuestionStore>,
    storage: Arc<dyn ContentStorage>,
    max_upload_bytes: usize,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        questions: Arc<dyn QuestionStore>,
        storage: Arc<dyn ContentStorage>,
    ) -> Self {
        Self {
            store,
            questions,
            storage,
            max_upload_bytes: 1024 * 1024,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Validates and persists one upload: the content is written durably
    /// first, then the record is created as `uploaded` and advanced to
    /// `processed`. A storage failure before the record exists leaves no
    /// orphan row.
    #[instrument(skip(self, content), fields(filename))]
    pub async fn upload(
        &self,
        filename: &str,
        content: &str,
        content_type: Option<&str>,
    ) -> Result<Document, DomainError> {
        let upload =
            validation::validate_upload(filename, content, content_type, self.max_upload_bytes)?;

        let key = storage_key(&upload.filename);
        self.storage.put(&key, upload.content.as_bytes()).await?;

        let doc = Document::new(upload.filename, key).with_content_type(upload.content_type);
        self.store.create(&doc).await?;
        self.store
            .update_status(doc.id, DocumentStatus::Processed)
            .await?;

        self.store.get(doc.id).await
    }

    /// Uploads a raw file: its text is extracted first, then the upload
    /// proceeds as for `upload`. Unsupported file types are rejected before
    /// any record is created.
    #[instrument(skip(self, bytes), fields(filename))]
    pub async fn upload_file(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<Document, DomainError> {
        if bytes.len() > self.max_upload_bytes {
            return Err(DomainError::validation(format!(
                "file exceeds maximum size of {} bytes",
                self.max_upload_bytes
            )));
        }

        let extracted = extract_text(filename, bytes)?;
        self.upload(filename, &extracted.text, Some(extracted.content_type))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Document, DomainError> {
        self.store.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Document>, DomainError> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: Uuid,
        status: DocumentStatus,
    ) -> Result<(), DomainError> {
        self.store.update_status(id, status).await
    }

    /// Administrative removal: the record, its questions, and the stored
    /// content all go.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let doc = self.store.get(id).await?;
        self.questions.delete_by_document(id).await?;
        self.storage.delete(&doc.content_ref).await?;
        self.store.delete(id).await
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.store.count().await
    }
}

fn storage_key(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-{}", Uuid::new_v4(), safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_sanitizes_filename() {
        let key = storage_key("weird name/../x.txt");
        assert!(!key.contains('/'));
        assert!(!key.contains(' '));
        assert!(key.ends_with("x.txt"));
    }
}
