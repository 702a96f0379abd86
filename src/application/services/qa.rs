use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::domain::{
    ports::{Answerer, ContentStorage, DocumentStore, QuestionStore},
    DomainError, Question,
};

pub struct QaService {
    documents: Arc<dyn DocumentStore>,
    questions: Arc<dyn QuestionStore>,
    storage: Arc<dyn ContentStorage>,
    answerer: Arc<dyn Answerer>,
    answer_timeout: Duration,
}

impl QaService {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        questions: Arc<dyn QuestionStore>,
        storage: Arc<dyn ContentStorage>,
        answerer: Arc<dyn Answerer>,
        answer_timeout: Duration,
    ) -> Self {
        Self {
            documents,
            questions,
            storage,
            answerer,
            answer_timeout,
        }
    }

    /// Creates a question against an existing document and answers it under
    /// the configured timeout. A failed or timed-out answering call leaves
    /// the question persisted as `error` with the answer absent; the caller
    /// may resubmit, which creates a new question record.
    #[instrument(skip(self))]
    pub async fn ask(
        &self,
        document_id: Uuid,
        question_text: &str,
    ) -> Result<Question, DomainError> {
        if question_text.trim().is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        // An unknown document fails here, before any question row exists.
        let document = self.documents.get(document_id).await?;
        let content = self.storage.get(&document.content_ref).await?;
        let text = String::from_utf8(content)
            .map_err(|_| DomainError::storage("stored content is not valid UTF-8"))?;

        let question = Question::new(document.id, question_text.trim());
        self.questions.create(&question).await?;

        let answering = self.answerer.answer(&text, &question.question);
        match timeout(self.answer_timeout, answering).await {
            Ok(Ok(answer)) => self.questions.set_answer(question.id, &answer).await,
            Ok(Err(e)) => {
                warn!(question_id = %question.id, error = %e, "answering failed");
                self.questions.mark_failed(question.id).await?;
                Err(DomainError::retryable(format!("answering failed: {}", e)))
            }
            Err(_) => {
                warn!(question_id = %question.id, "answering timed out");
                self.questions.mark_failed(question.id).await?;
                Err(DomainError::retryable(
                    "answering timed out; resubmit the question",
                ))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Question, DomainError> {
        self.questions.get(id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, document_id: Option<Uuid>) -> Result<Vec<Question>, DomainError> {
        self.questions.list(document_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.questions.delete(id).await
    }

    pub async fn count(&self) -> Result<u64, DomainError> {
        self.questions.count().await
    }
}
