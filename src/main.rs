use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use document_qa::api::{create_router, AppState};
use document_qa::application::{DocumentService, QaService};
use document_qa::infrastructure::{
    db, AnthropicAnswerer, AppConfig, FsContentStorage, SqliteDocumentStore, SqliteQuestionStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "document_qa=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let pool = db::connect(&config.database_url).await?;
    db::create_tables(&pool).await?;
    info!("database ready at {}", config.database_url);

    let document_store = Arc::new(SqliteDocumentStore::new(pool.clone()));
    let question_store = Arc::new(SqliteQuestionStore::new(pool.clone()));
    let content_storage = Arc::new(FsContentStorage::new(&config.storage_dir));
    let answerer = Arc::new(AnthropicAnswerer::new(&config.anthropic_model));

    let document_service = Arc::new(
        DocumentService::new(
            document_store.clone(),
            question_store.clone(),
            content_storage.clone(),
        )
        .with_max_upload_bytes(config.max_upload_bytes),
    );
    let qa_service = Arc::new(QaService::new(
        document_store,
        question_store,
        content_storage,
        answerer,
        Duration::from_secs(config.answer_timeout_secs),
    ));

    let addr = SocketAddr::new(config.server_host.parse()?, config.server_port);
    let state = AppState::new(pool, document_service, qa_service, config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
