pub mod config;
pub mod db;
pub mod llm;
pub mod storage;
pub mod store;

pub use config::AppConfig;
pub use llm::AnthropicAnswerer;
pub use storage::{FsContentStorage, InMemoryContentStorage};
pub use store::{
    InMemoryDocumentStore, InMemoryQuestionStore, SqliteDocumentStore, SqliteQuestionStore,
};
