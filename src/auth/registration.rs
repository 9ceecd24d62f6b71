//! User registration for Orchard.

use thiserror::Error;
use tracing::info;

use crate::auth::{hash_password, PasswordError};
use crate::config::PasswordConfig;
use crate::db::{NewUser, User, UserRepository};
use crate::OrchardError;

/// Registration-specific errors.
///
/// The `Display` text of the first two variants is shown to the user.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Password and confirmation differ.
    #[error("Passwords do not match.")]
    PasswordMismatch,

    /// Username already exists.
    #[error("Username already taken.")]
    UsernameTaken,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Storage failure.
    #[error("database error: {0}")]
    Database(OrchardError),
}

impl RegistrationError {
    /// Whether this failure is caused by the submitted input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::PasswordMismatch | Self::UsernameTaken)
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }
}

/// Register a new user.
///
/// Checks, in order:
/// 1. password equals its confirmation
/// 2. username is not registered yet
///
/// then hashes the password and stores the user. A duplicate that slips
/// past step 2 is caught by the UNIQUE constraint and reported the same way.
pub async fn register(
    repo: &UserRepository<'_>,
    request: &RegistrationRequest,
    password_config: &PasswordConfig,
) -> Result<User, RegistrationError> {
    if request.password != request.confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }

    if repo
        .username_exists(&request.username)
        .await
        .map_err(RegistrationError::Database)?
    {
        return Err(RegistrationError::UsernameTaken);
    }

    let password_hash = hash_password(&request.password, password_config)?;

    let user = repo
        .create(&NewUser::new(&request.username, password_hash))
        .await
        .map_err(|e| match e {
            OrchardError::Conflict(_) => RegistrationError::UsernameTaken,
            other => RegistrationError::Database(other),
        })?;

    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::Database;

    fn cheap() -> PasswordConfig {
        PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let request = RegistrationRequest::new("alice", "secret", "secret");
        let user = register(&repo, &request, &cheap()).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password, "secret");
        assert!(verify_password("secret", &user.password).is_ok());
    }

    #[tokio::test]
    async fn test_register_password_mismatch_creates_nothing() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let request = RegistrationRequest::new("alice", "secret", "secreT");
        let err = register(&repo, &request, &cheap()).await.unwrap_err();

        assert!(matches!(err, RegistrationError::PasswordMismatch));
        assert_eq!(err.to_string(), "Passwords do not match.");
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mismatch_checked_before_uniqueness() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        register(&repo, &RegistrationRequest::new("alice", "a", "a"), &cheap())
            .await
            .unwrap();

        let err = register(&repo, &RegistrationRequest::new("alice", "a", "b"), &cheap())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrationError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        register(&repo, &RegistrationRequest::new("alice", "a", "a"), &cheap())
            .await
            .unwrap();

        let err = register(&repo, &RegistrationRequest::new("alice", "b", "b"), &cheap())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::UsernameTaken));
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "Username already taken.");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_user_error() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        db.close().await;

        let err = register(&repo, &RegistrationRequest::new("alice", "a", "a"), &cheap())
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::Database(_)));
        assert!(!err.is_user_error());
    }
}
