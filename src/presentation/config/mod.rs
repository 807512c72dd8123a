mod environment;
mod settings;

pub use environment::{Environment, UnknownEnvironment};
pub use settings::{
    AuthSettings, ChunkingSettings, DatabaseSettings, EmailSettings, LoggingSettings,
    OpenAiSettings, QdrantSettings, RetrievalSettings, ServerSettings, Settings,
    TranscriptionSettings, UploadSettings,
};
