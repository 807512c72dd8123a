use rand::Rng;

const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()-_";
const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const GENERATED_PASSWORD_LENGTH: usize = 8;
pub const RESET_TOKEN_LENGTH: usize = 24;

/// Initial password for invited team members, mixing letters, digits and symbols.
pub fn generate_password() -> String {
    random_string(PASSWORD_CHARSET, GENERATED_PASSWORD_LENGTH)
}

/// Alphanumeric token used by the password reset flow.
pub fn generate_reset_token(length: usize) -> String {
    random_string(TOKEN_CHARSET, length)
}

fn random_string(charset: &[u8], length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}
