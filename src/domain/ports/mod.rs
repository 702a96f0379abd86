mod answerer;
mod content_storage;
mod document_store;
mod question_store;

pub use answerer::Answerer;
pub use content_storage::ContentStorage;
pub use document_store::DocumentStore;
pub use question_store::QuestionStore;
