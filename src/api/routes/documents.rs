use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{Document, DocumentStatus, DomainError};

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub filename: String,
    pub content: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub status: DocumentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename,
            content_type: doc.content_type,
            status: doc.status,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    let doc = state
        .document_service
        .upload(
            &request.filename,
            &request.content,
            request.content_type.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(doc))))
}

/// Multipart upload: an optional `filename` text field plus a `file` part.
/// Text is extracted before a record is created; unsupported file types are
/// rejected.
pub async fn upload_document_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentResponse>), ApiError> {
    let mut filename: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::validation(format!("malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("filename") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| DomainError::validation(format!("malformed filename field: {}", e)))?;
                filename = Some(value);
            }
            Some("file") => {
                let part_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| DomainError::validation(format!("malformed file field: {}", e)))?;
                file = Some((part_name.unwrap_or_default(), bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (part_filename, bytes) =
        file.ok_or_else(|| DomainError::validation("file field is required"))?;
    let filename = filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(part_filename);

    let doc = state.document_service.upload_file(&filename, &bytes).await?;

    Ok((StatusCode::CREATED, Json(DocumentResponse::from(doc))))
}

pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
    let docs = state.document_service.list().await?;
    Ok(Json(docs.into_iter().map(DocumentResponse::from).collect()))
}

pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let doc = state.document_service.get(id).await?;
    Ok(Json(DocumentResponse::from(doc)))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.document_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
