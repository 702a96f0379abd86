mod document;
mod question;

pub use document::{extract_text, Document, DocumentStatus, ExtractedText};
pub use question::{Question, QuestionStatus};
