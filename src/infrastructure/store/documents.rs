use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{db_err, parse_row_id, parse_row_timestamp};
use crate::domain::{ports::DocumentStore, Document, DocumentStatus, DomainError};

#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn map_document(row: &SqliteRow) -> Result<Document, DomainError> {
    let id: String = row.try_get("id").map_err(db_err)?;
    let status: String = row.try_get("status").map_err(db_err)?;
    let created_at: String = row.try_get("created_at").map_err(db_err)?;
    let updated_at: Option<String> = row.try_get("updated_at").map_err(db_err)?;

    Ok(Document {
        id: parse_row_id(&id, "id")?,
        filename: row.try_get("filename").map_err(db_err)?,
        content_ref: row.try_get("content_ref").map_err(db_err)?,
        content_type: row.try_get("content_type").map_err(db_err)?,
        status: DocumentStatus::parse(&status)
            .ok_or_else(|| DomainError::storage(format!("unrecognized document status: {}", status)))?,
        created_at: parse_row_timestamp(&created_at, "created_at")?,
        updated_at: updated_at
            .as_deref()
            .map(|t| parse_row_timestamp(t, "updated_at"))
            .transpose()?,
    })
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create(&self, doc: &Document) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO documents (id, filename, content_ref, content_type, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(doc.id.to_string())
        .bind(&doc.filename)
        .bind(&doc.content_ref)
        .bind(&doc.content_type)
        .bind(doc.status.as_str())
        .bind(doc.created_at.to_rfc3339())
        .bind(doc.updated_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Document, DomainError> {
        let row = sqlx::query("SELECT * FROM documents WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;

        match row {
            Some(row) => map_document(&row),
            None => Err(DomainError::not_found(format!("document {} not found", id))),
        }
    }

    async fn list(&self) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query("SELECT * FROM documents ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(map_document).collect()
    }

    async fn update_status(&self, id: Uuid, status: DocumentStatus) -> Result<(), DomainError> {
        let current = self.get(id).await?;
        if current.status == status {
            return Ok(());
        }
        if !current.status.can_transition_to(status) {
            return Err(DomainError::validation(format!(
                "document status cannot change from {} to {}",
                current.status.as_str(),
                status.as_str()
            )));
        }

        // The status guard in the WHERE clause keeps the transition atomic
        // under concurrent updates.
        let result = sqlx::query(
            "UPDATE documents SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        )
        .bind(status.as_str())
        .bind(Utc::now().to_rfc3339())
        .bind(id.to_string())
        .bind(current.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::storage(format!(
                "document {} changed status concurrently",
                id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("document {} not found", id)));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let total: i64 = row.try_get("total").map_err(db_err)?;
        Ok(total as u64)
    }
}
