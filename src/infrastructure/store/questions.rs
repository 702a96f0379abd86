use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{db_err, parse_row_id, parse_row_timestamp};
use crate::domain::{ports::QuestionStore, DomainError, Question, QuestionStatus};

#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_question(row: &SqliteRow) -> Result<Question, DomainError> {
    let id: String = row.try_get("id").map_err(db_err)?;
    let document_id: String = row.try_get("document_id").map_err(db_err)?;
    let status: String = row.try_get("status").map_err(db_err)?;
    let created_at: String = row.try_get("created_at").map_err(db_err)?;
    let updated_at: Option<String> = row.try_get("updated_at").map_err(db_err)?;

    Ok(Question {
        id: parse_row_id(&id, "id")?,
        document_id: parse_row_id(&document_id, "document_id")?,
        question: row.try_get("question").map_err(db_err)?,
        answer: row.try_get("answer").map_err(db_err)?,
        status: QuestionStatus::parse(&status)
            .ok_or_else(|| DomainError::storage(format!("unrecognized question status: {}", status)))?,
        created_at: parse_row_timestamp(&created_at, "created_at")?,
        updated_at: updated_at
            .as_deref()
            .map(|t| parse_row_timestamp(t, "updated_at"))
            .transpose()?,
    })
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn create(&self, question: &Question) -> Result<(), DomainError> {
        let document = sqlx::query("SELECT 1 FROM documents WHERE id = ?1")
            .bind(question.document_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        if document.is_none() {
            return Err(DomainError::not_found(format!(
                "document {} not found",
                question.document_id
            )));
        }

        sqlx::query(
            "INSERT INTO questions (id, document_id, question, answer, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(question.id.to_string())
        .bind(question.document_id.to_string())
        .bind(&question.question)
        .bind(question.answer.as_deref())
        .bind(question.status.as_str())
        .bind(question.created_at.to_rfc3339())
        .bind(question.updated_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn set_answer(&self, id: Uuid, answer: &str) -> Result<Question, DomainError> {
        // The status guard makes finalization atomic: only a pending
        // question can receive an answer.
        let result = sqlx::query(
            "UPDATE questions SET answer = ?1, status = 'answered', updated_at = ?2 \
             WHERE id = ?3 AND status = 'pending'",
        )
        .bind(answer)
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            let existing = self.get(id).await?;
            return Err(DomainError::validation(format!(
                "question {} is already {}",
                existing.id,
                existing.status.as_str()
            )));
        }

        self.get(id).await
    }

    async fn mark_failed(&self, id: Uuid) -> Result<Question, DomainError> {
        let result = sqlx::query(
            "UPDATE questions SET status = 'error', updated_at = ?1 \
             WHERE id = ?2 AND status = 'pending'",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            let existing = self.get(id).await?;
            return Err(DomainError::validation(format!(
                "question {} is already {}",
                existing.id,
                existing.status.as_str()
            )));
        }

        self.get(id).await
    }

    async fn get(&self, id: Uuid) -> Result<Question, DomainError> {
        let row = sqlx::query("SELECT * FROM questions WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match row {
            Some(row) => map_question(&row),
            None => Err(DomainError::not_found(format!("question {} not found", id))),
        }
    }

    async fn list(&self, document_id: Option<Uuid>) -> Result<Vec<Question>, DomainError> {
        let rows = match document_id {
            Some(document_id) => {
                sqlx::query(
                    "SELECT * FROM questions WHERE document_id = ?1 \
                     ORDER BY created_at ASC, id ASC",
                )
                .bind(document_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM questions ORDER BY created_at ASC, id ASC")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(db_err)?;

        rows.iter().map(map_question).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("question {} not found", id)));
        }

        Ok(())
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM questions WHERE document_id = ?1")
            .bind(document_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM questions")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let total: i64 = row.try_get("total").map_err(db_err)?;
        Ok(total as u64)
    }
}
