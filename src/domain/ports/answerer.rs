use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// The external answering capability: produces an answer string given the
/// document text and a question.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, document_text: &str, question: &str) -> Result<String, DomainError>;
}
