/// Issues and verifies the signed session tokens carried in `Authorization` headers.
pub trait TokenService: Send + Sync {
    fn issue(&self, email: &str) -> Result<String, TokenError>;

    /// Returns the email the token was issued for.
    fn verify(&self, token: &str) -> Result<String, TokenError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    EncodingFailed(String),
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token expired")]
    Expired,
}
