use async_trait::async_trait;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordHasherError {
    #[error("hashing failed: {0}")]
    HashingFailed(String),
    #[error("verification failed: {0}")]
    VerificationFailed(String),
}
