use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub storage_dir: String,
    pub max_upload_bytes: usize,
    pub answer_timeout_secs: u64,
    pub anthropic_model: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://document_qa.db?mode=rwc".to_string(),
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            storage_dir: "./data".to_string(),
            max_upload_bytes: 1024 * 1024,
            answer_timeout_secs: 30,
            anthropic_model: "claude-3-opus-20240229".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl AppConfig {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let server_port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.server_port,
        };
        let max_upload_bytes = match std::env::var("MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.max_upload_bytes,
        };
        let answer_timeout_secs = match std::env::var("ANSWER_TIMEOUT_SECS") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.answer_timeout_secs,
        };
        let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.cors_allowed_origins,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            storage_dir: std::env::var("STORAGE_DIR").unwrap_or(defaults.storage_dir),
            max_upload_bytes,
            answer_timeout_secs,
            anthropic_model: std::env::var("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            cors_allowed_origins,
        })
    }
}
