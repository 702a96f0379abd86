use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::{DocumentService, QaService};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub document_service: Arc<DocumentService>,
    pub qa_service: Arc<QaService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        document_service: Arc<DocumentService>,
        qa_service: Arc<QaService>,
        config: AppConfig,
    ) -> Self {
        Self {
            pool,
            document_service,
            qa_service,
            config: Arc::new(config),
        }
    }
}
