use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Pending,
    Answered,
    Error,
}

impl QuestionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Answered => "answered",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "answered" => Some(Self::Answered),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One question asked against a document.
///
/// `answer` stays `None` until the answering flow completes. Once an answer
/// is recorded the question is final; a failed answering attempt marks the
/// question `Error` with the answer still absent, and re-asking creates a
/// new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub document_id: Uuid,
    pub question: String,
    pub answer: Option<String>,
    pub status: QuestionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(document_id: Uuid, question: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            question: question.into(),
            answer: None,
            status: QuestionStatus::Pending,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self.status, QuestionStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_question_is_pending_and_unanswered() {
        let q = Question::new(Uuid::new_v4(), "What is this?");
        assert_eq!(q.status, QuestionStatus::Pending);
        assert!(q.answer.is_none());
        assert!(!q.is_final());
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            QuestionStatus::Pending,
            QuestionStatus::Answered,
            QuestionStatus::Error,
        ] {
            assert_eq!(QuestionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QuestionStatus::parse("unknown"), None);
    }

    #[test]
    fn test_unanswered_question_serializes_null_answer() {
        let q = Question::new(Uuid::new_v4(), "what?");
        let value = serde_json::to_value(&q).unwrap();
        assert!(value["answer"].is_null());
        assert_eq!(value["status"], "pending");
    }
}
