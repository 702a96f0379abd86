use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    ports::{DocumentStore, QuestionStore},
    Document, DocumentStatus, DomainError, Question, QuestionStatus,
};

/// In-memory document store. Useful for tests and local development; the
/// deployed service uses the SQLite-backed store.
pub struct InMemoryDocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, doc: &Document) -> Result<(), DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        store.push(doc.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Document, DomainError> {
        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        store
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("document {} not found", id)))
    }

    async fn list(&self) -> Result<Vec<Document>, DomainError> {
        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let mut docs = store.clone();
        docs.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(docs)
    }

    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<(), DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let doc = store
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DomainError::not_found(format!("document {} not found", id)))?;

        if doc.status == status {
            return Ok(());
        }
        if !doc.status.can_transition_to(status) {
            return Err(DomainError::validation(format!(
                "document status cannot change from {} to {}",
                doc.status.as_str(),
                status.as_str()
            )));
        }

        doc.status = status;
        doc.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = self
            .documents
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let before = store.len();
        store.retain(|d| d.id != id);
        if store.len() == before {
            return Err(DomainError::not_found(format!("document {} not found", id)));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self
            .documents
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(store.len() as u64)
    }
}

pub struct InMemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionStore {
    pub fn new() -> Self {
        Self {
            questions: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryQuestionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn create(&self, question: &Question) -> Result<(), DomainError> {
        let mut store = self
            .questions
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        store.push(question.clone());
        Ok(())
    }

    async fn set_answer(&self, id: Uuid, answer: &str) -> Result<Question, DomainError> {
        let mut store = self
            .questions
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let question = store
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| DomainError::not_found(format!("question {} not found", id)))?;

        if question.is_final() {
            return Err(DomainError::validation(format!(
                "question {} is already {}",
                question.id,
                question.status.as_str()
            )));
        }

        question.answer = Some(answer.to_string());
        question.status = QuestionStatus::Answered;
        question.updated_at = Some(Utc::now());
        Ok(question.clone())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<Question, DomainError> {
        let mut store = self
            .questions
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let question = store
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| DomainError::not_found(format!("question {} not found", id)))?;

        if question.is_final() {
            return Err(DomainError::validation(format!(
                "question {} is already {}",
                question.id,
                question.status.as_str()
            )));
        }

        question.status = QuestionStatus::Error;
        question.updated_at = Some(Utc::now());
        Ok(question.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Question, DomainError> {
        let store = self
            .questions
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        store
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("question {} not found", id)))
    }

    async fn list(&self, document_id: Option<Uuid>) -> Result<Vec<Question>, DomainError> {
        let store = self
            .questions
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let mut questions: Vec<Question> = store
            .iter()
            .filter(|q| document_id.map_or(true, |id| q.document_id == id))
            .cloned()
            .collect();
        questions.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(questions)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut store = self
            .questions
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        let before = store.len();
        store.retain(|q| q.id != id);
        if store.len() == before {
            return Err(DomainError::not_found(format!("question {} not found", id)));
        }

        Ok(())
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        let mut store = self
            .questions
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        store.retain(|q| q.document_id != document_id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let store = self
            .questions
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        Ok(store.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_document_create_get_list() {
        let store = InMemoryDocumentStore::new();
        let doc = Document::new("a.txt", "blobs/a");
        store.create(&doc).await.unwrap();

        let fetched = store.get(doc.id).await.unwrap();
        assert_eq!(fetched.filename, "a.txt");
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_document_get_missing_is_not_found() {
        let store = InMemoryDocumentStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_document_status_does_not_regress() {
        let store = InMemoryDocumentStore::new();
        let doc = Document::new("a.txt", "blobs/a");
        store.create(&doc).await.unwrap();

        store
            .update_status(doc.id, DocumentStatus::Processed)
            .await
            .unwrap();
        let err = store
            .update_status(doc.id, DocumentStatus::Failed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            store.get(doc.id).await.unwrap().status,
            DocumentStatus::Processed
        );
    }

    #[tokio::test]
    async fn test_answer_finalizes_question() {
        let store = InMemoryQuestionStore::new();
        let question = Question::new(Uuid::new_v4(), "what?");
        store.create(&question).await.unwrap();

        let answered = store.set_answer(question.id, "that").await.unwrap();
        assert_eq!(answered.answer.as_deref(), Some("that"));
        assert_eq!(answered.status, QuestionStatus::Answered);

        let err = store.set_answer(question.id, "again").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_mark_failed_leaves_answer_absent() {
        let store = InMemoryQuestionStore::new();
        let question = Question::new(Uuid::new_v4(), "what?");
        store.create(&question).await.unwrap();

        let failed = store.mark_failed(question.id).await.unwrap();
        assert_eq!(failed.status, QuestionStatus::Error);
        assert!(failed.answer.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_document() {
        let store = InMemoryQuestionStore::new();
        let doc_a = Uuid::new_v4();
        let doc_b = Uuid::new_v4();
        store.create(&Question::new(doc_a, "q1")).await.unwrap();
        store.create(&Question::new(doc_b, "q2")).await.unwrap();

        assert_eq!(store.list(None).await.unwrap().len(), 2);
        let filtered = store.list(Some(doc_a)).await.unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].question, "q1");
    }

    #[tokio::test]
    async fn test_delete_by_document() {
        let store = InMemoryQuestionStore::new();
        let doc_id = Uuid::new_v4();
        store.create(&Question::new(doc_id, "q1")).await.unwrap();
        store.create(&Question::new(doc_id, "q2")).await.unwrap();

        store.delete_by_document(doc_id).await.unwrap();
        assert!(store.list(None).await.unwrap().is_empty());
    }
}
