//! Credential verification.

use thiserror::Error;
use tracing::{debug, info};

use crate::auth::verify_password;
use crate::db::{User, UserRepository};
use crate::OrchardError;

/// Login errors.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Unknown username or wrong password; deliberately indistinguishable.
    #[error("Login failed. Please try again.")]
    InvalidCredentials,

    /// Storage failure.
    #[error("database error: {0}")]
    Database(#[from] OrchardError),
}

/// Look up a user by exact username and check the password.
pub async fn authenticate(
    repo: &UserRepository<'_>,
    username: &str,
    password: &str,
) -> Result<User, LoginError> {
    let Some(user) = repo.get_by_username(username).await? else {
        debug!(username, "Login for unknown user");
        return Err(LoginError::InvalidCredentials);
    };

    if let Err(e) = verify_password(password, &user.password) {
        debug!(username, error = %e, "Password verification failed");
        return Err(LoginError::InvalidCredentials);
    }

    info!(user_id = user.id, username = %user.username, "User signed in");
    Ok(user)
}
