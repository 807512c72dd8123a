/// Failure of a relational repository. Callers only branch on `Duplicate`,
/// which signals a unique-key clash such as an already registered email.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("unique key already taken: {0}")]
    Duplicate(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("stored row is not a valid record: {0}")]
    CorruptRecord(String),
}
