use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Durable storage for uploaded document content, addressed by the
/// `content_ref` key recorded on the document.
#[async_trait]
pub trait ContentStorage: Send + Sync {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), DomainError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, DomainError>;
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
