mod pg_pool;
mod repositories;
mod vector_store;

pub use pg_pool::{create_pool, run_migrations};

pub use repositories::{
    InMemoryDocumentRepository, InMemoryMeetingRepository, InMemoryUserRepository,
    PgDocumentRepository, PgMeetingRepository, PgUserRepository,
};

pub use vector_store::{ConnectionGate, ConnectionLease, InMemoryVectorStore, QdrantAdapter};
