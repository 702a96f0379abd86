use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Document, DocumentStatus};

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, doc: &Document) -> Result<(), DomainError>;
    async fn get(&self, id: Uuid) -> Result<Document, DomainError>;
    /// Documents ordered by creation time, ascending.
    async fn list(&self) -> Result<Vec<Document>, DomainError>;
    /// Transitions must be monotonic; a regression is a validation error.
    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
}
