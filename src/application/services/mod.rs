mod document;
mod qa;

pub use document::DocumentService;
pub use qa::QaService;
