use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Question};

#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// The owning document must exist before a question referencing it is
    /// created; the SQL-backed store additionally enforces the reference.
    async fn create(&self, question: &Question) -> Result<(), DomainError>;
    /// Records the answer and finalizes the question. Answering an already
    /// final question is a validation error.
    async fn set_answer(&self, id: Uuid, answer: &str) -> Result<Question, DomainError>;
    /// Marks a pending question as failed, leaving the answer absent.
    async fn mark_failed(&self, id: Uuid) -> Result<Question, DomainError>;
    async fn get(&self, id: Uuid) -> Result<Question, DomainError>;
    /// Questions ordered by creation time, ascending, optionally filtered
    /// by owning document.
    async fn list(&self, document_id: Option<Uuid>) -> Result<Vec<Question>, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    /// Removes every question owned by the document.
    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
