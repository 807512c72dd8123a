mod in_memory_repositories;
mod pg_document_repository;
mod pg_error;
mod pg_meeting_repository;
mod pg_user_repository;

pub use in_memory_repositories::{
    InMemoryDocumentRepository, InMemoryMeetingRepository, InMemoryUserRepository,
};
pub use pg_document_repository::PgDocumentRepository;
pub use pg_meeting_repository::PgMeetingRepository;
pub use pg_user_repository::PgUserRepository;
