use chrono::Duration;

use blitzday::application::ports::{PasswordHasher, TokenError, TokenService};
use blitzday::infrastructure::auth::{BcryptHasher, JwtTokenService};

#[test]
fn given_issued_token_when_verifying_then_returns_email() {
    let tokens = JwtTokenService::new("secret", Duration::hours(1));

    let token = tokens.issue("ada@acme.test").unwrap();

    assert_eq!(tokens.verify(&token).unwrap(), "ada@acme.test");
}

#[test]
fn given_token_signed_with_other_secret_when_verifying_then_invalid() {
    let issuer = JwtTokenService::new("secret-a", Duration::hours(1));
    let verifier = JwtTokenService::new("secret-b", Duration::hours(1));

    let token = issuer.issue("ada@acme.test").unwrap();

    assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid(_))));
}

#[test]
fn given_expired_token_when_verifying_then_expired() {
    let tokens = JwtTokenService::new("secret", Duration::seconds(-60));

    let token = tokens.issue("ada@acme.test").unwrap();

    assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
}

#[test]
fn given_garbage_when_verifying_then_invalid() {
    let tokens = JwtTokenService::new("secret", Duration::hours(1));

    assert!(matches!(
        tokens.verify("not.a.token"),
        Err(TokenError::Invalid(_))
    ));
}

#[tokio::test]
async fn given_hashed_password_when_verifying_then_only_original_matches() {
    let hasher = BcryptHasher::new(4);

    let hash = hasher.hash("correct horse").await.unwrap();

    assert_ne!(hash, "correct horse");
    assert!(hasher.verify("correct horse", &hash).await.unwrap());
    assert!(!hasher.verify("battery staple", &hash).await.unwrap());
}

#[tokio::test]
async fn given_malformed_stored_hash_when_verifying_then_no_match() {
    let hasher = BcryptHasher::new(4);

    assert!(!hasher.verify("anything", "plaintext").await.unwrap());
}
