use std::env;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub qdrant: QdrantSettings,
    pub openai: OpenAiSettings,
    #[serde(default)]
    pub chunking: ChunkingSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    pub auth: AuthSettings,
    pub transcription: TranscriptionSettings,
    pub email: EmailSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_retries: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QdrantSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub collection_name: String,
    pub vector_dimensions: u64,
    /// Upper bound on concurrent vector-store operations.
    pub max_connections: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    pub top_k: usize,
    pub fetch_k: usize,
    pub lambda: f32,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 4,
            fetch_k: 20,
            lambda: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailSettings {
    /// When false, outgoing mail is only logged.
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub demo_receiver: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub staging_path: String,
    pub max_files: usize,
    pub max_request_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            staging_path: "uploads".to_string(),
            max_files: 10,
            max_request_bytes: 50 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, e.g. `info,blitzday=debug`.
    pub level: String,
    /// JSON output. Unset means JSON in prod and pretty lines elsewhere.
    #[serde(default)]
    pub json: Option<bool>,
}

impl Settings {
    /// Loads `.env`, then `appsettings.{environment}.toml`, then `APP__`-prefixed variables.
    pub fn load() -> Result<(Self, Environment), ConfigError> {
        dotenvy::dotenv().ok();

        let environment = match env::var("APP_ENVIRONMENT") {
            Ok(raw) => raw
                .parse::<Environment>()
                .map_err(|e| ConfigError::Message(e.to_string()))?,
            Err(_) => Environment::default(),
        };

        let settings = Self::load_for(environment)?;
        Ok((settings, environment))
    }

    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&environment.settings_file()).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
