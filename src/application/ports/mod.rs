mod document_repository;
mod file_loader;
mod language_model;
mod mailer;
mod meeting_repository;
mod password_hasher;
mod repository_error;
mod staging_store;
mod text_splitter;
mod token_service;
mod transcription_client;
mod user_repository;
mod vector_store;

pub use document_repository::DocumentRepository;
pub use file_loader::{FileLoader, FileLoaderError};
pub use language_model::{Embedder, LlmClient, ModelError};
pub use mailer::{Mailer, MailerError, OutgoingEmail};
pub use meeting_repository::MeetingRepository;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
pub use repository_error::RepositoryError;
pub use staging_store::{ByteStream, StagingStore, StagingStoreError};
pub use text_splitter::{TextSplitter, TextSplitterError, TextWindow};
pub use token_service::{TokenError, TokenService};
pub use transcription_client::{TranscriptionClient, TranscriptionError};
pub use user_repository::UserRepository;
pub use vector_store::{FilteredField, IndexLayout, ScoredChunk, VectorStore, VectorStoreError};
