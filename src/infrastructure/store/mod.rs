mod documents;
mod memory;
mod questions;

pub use documents::SqliteDocumentStore;
pub use memory::{InMemoryDocumentStore, InMemoryQuestionStore};
pub use questions::SqliteQuestionStore;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::storage(e.to_string())
}

pub(crate) fn parse_row_id(raw: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw)
        .map_err(|e| DomainError::storage(format!("invalid {} in row: {}", column, e)))
}

pub(crate) fn parse_row_timestamp(raw: &str, column: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DomainError::storage(format!("invalid {} in row: {}", column, e)))
}
