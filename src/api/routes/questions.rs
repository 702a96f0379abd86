use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::{validation, Question, QuestionStatus};

/// `document_id` arrives as a string so well-formedness is reported through
/// the validation layer alongside any other violation.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub document_id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub document_id: Uuid,
    pub question: String,
    pub answer: Option<String>,
    pub status: QuestionStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            document_id: q.document_id,
            question: q.question,
            answer: q.answer,
            status: q.status,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuestionsQuery {
    pub document_id: Option<Uuid>,
}

pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let ask = validation::validate_ask(&request.document_id, &request.question)?;
    let question = state.qa_service.ask(ask.document_id, &ask.question).await?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    let questions = state.qa_service.list(query.document_id).await?;
    Ok(Json(
        questions.into_iter().map(QuestionResponse::from).collect(),
    ))
}

pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state.qa_service.get(id).await?;
    Ok(Json(QuestionResponse::from(question)))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.qa_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
