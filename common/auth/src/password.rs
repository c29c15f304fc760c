//! Password hashing, run on the blocking thread pool as bcrypt is slow by intent.

pub use bcrypt::BcryptError;
use tokio::task::{spawn_blocking, JoinError};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),
    #[error("password hashing did not complete: {0}")]
    Join(#[from] JoinError),
}

/// Hash a plain text password for storage.
pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_string();
    Ok(spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST)).await??)
}

/// Check a plain text password against a stored hash.
///
/// A malformed hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let (password, hash) = (password.to_string(), hash.to_string());
    match spawn_blocking(move || bcrypt::verify(password, &hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(err)) => {
            log::warn!("unable to verify password hash: {err}");
            false
        }
        Err(err) => {
            log::warn!("password verification did not complete: {err}");
            false
        }
    }
}
