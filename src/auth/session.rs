//! Server-side session management for Orchard.
//!
//! A session is identified by an opaque UUID v4 token. The token is all the
//! client holds; the user reference lives in the `sessions` table.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{DbPool, NewSessionRecord, SessionRecord, SessionRepository, User};
use crate::OrchardError;

/// Session-related errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Storage failure.
    #[error("session storage error: {0}")]
    Storage(#[from] OrchardError),

    /// The session lifetime cannot be added to the issue time.
    #[error("session lifetime of {0:?} is out of range")]
    TtlOutOfRange(Duration),
}

/// The user reference carried by a session.
///
/// Captured at sign-in and not re-validated against the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// A live authentication session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Opaque session token.
    pub token: String,
    /// Signed-in user.
    pub user: SessionUser,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Check if the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    fn from_record(record: SessionRecord) -> Self {
        let expires_at = Utc
            .timestamp_opt(record.expires_at, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            token: record.id,
            user: SessionUser {
                id: record.user_id,
                username: record.username,
            },
            expires_at,
        }
    }
}

/// Issues, resolves and destroys sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    pool: DbPool,
    ttl: Duration,
}

impl SessionManager {
    /// Create a session manager over the given pool.
    pub fn new(pool: DbPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Start a new session for a user.
    pub async fn create(&self, user: &User) -> Result<AuthSession, SessionError> {
        self.create_at(user, Utc::now()).await
    }

    async fn create_at(
        &self,
        user: &User,
        now: DateTime<Utc>,
    ) -> Result<AuthSession, SessionError> {
        let expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(SessionError::TtlOutOfRange(self.ttl))?;
        let session = AuthSession {
            token: Uuid::new_v4().to_string(),
            user: SessionUser::from(user),
            expires_at,
        };

        SessionRepository::new(&self.pool)
            .create(&NewSessionRecord {
                id: session.token.clone(),
                user_id: session.user.id,
                username: session.user.username.clone(),
                expires_at: session.expires_at.timestamp(),
            })
            .await?;

        info!(user_id = user.id, "Session created");
        Ok(session)
    }

    /// Resolve a token to a live session.
    ///
    /// Unknown and expired tokens both yield `None`; an expired row is
    /// deleted on the way out.
    pub async fn get(&self, token: &str) -> Result<Option<AuthSession>, SessionError> {
        self.get_at(token, Utc::now()).await
    }

    async fn get_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthSession>, SessionError> {
        let repo = SessionRepository::new(&self.pool);
        let Some(record) = repo.get(token).await? else {
            return Ok(None);
        };

        let session = AuthSession::from_record(record);
        if session.is_expired_at(now) {
            debug!(user_id = session.user.id, "Session expired");
            repo.delete(token).await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Destroy a session. Unknown tokens are ignored.
    pub async fn destroy(&self, token: &str) -> Result<(), SessionError> {
        if SessionRepository::new(&self.pool).delete(token).await? {
            info!("Session destroyed");
        }
        Ok(())
    }

    /// Delete all expired sessions, returning how many were removed.
    pub async fn cleanup_expired(&self) -> Result<u64, SessionError> {
        let count = SessionRepository::new(&self.pool)
            .delete_expired(Utc::now().timestamp())
            .await?;
        Ok(count)
    }
}
