use async_trait::async_trait;

use crate::application::ports::{PasswordHasher, PasswordHasherError};

/// bcrypt on the blocking pool; hashing at the default cost takes tens of milliseconds.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))?
            .map_err(|e| PasswordHasherError::HashingFailed(e.to_string()))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHasherError> {
        let password = password.to_string();
        let hash = hash.to_string();

        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| PasswordHasherError::VerificationFailed(e.to_string()))?;

        match outcome {
            Ok(matches) => Ok(matches),
            // A malformed stored hash can never match.
            Err(bcrypt::BcryptError::InvalidHash(_))
            | Err(bcrypt::BcryptError::InvalidPrefix(_)) => Ok(false),
            Err(e) => Err(PasswordHasherError::VerificationFailed(e.to_string())),
        }
    }
}
