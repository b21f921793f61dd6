use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::error;
use crate::error::AppError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!("Password hashing failed: {}", e);
            AppError::Internal
        })
}

pub fn generate_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Six uppercase hex characters.
pub fn generate_otp() -> String {
    let bytes: [u8; 3] = rand::thread_rng().r#gen();
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
