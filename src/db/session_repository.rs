//! Server-side session storage.

use super::DbPool;
use crate::Result;

/// Stored session row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct SessionRecord {
    /// Opaque session identifier.
    pub id: String,
    /// ID of the user the session was issued to.
    pub user_id: i64,
    /// Username at issue time.
    pub username: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// New session row for creation.
pub struct NewSessionRecord {
    /// Opaque session identifier.
    pub id: String,
    /// User ID.
    pub user_id: i64,
    /// Username.
    pub username: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

/// Repository for session rows.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a session.
    pub async fn create(&self, record: &NewSessionRecord) -> Result<()> {
        sqlx::query("INSERT INTO sessions (id, user_id, username, expires_at) VALUES (?, ?, ?, ?)")
            .bind(&record.id)
            .bind(record.user_id)
            .bind(&record.username)
            .bind(record.expires_at)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    /// Get a session by ID regardless of expiry.
    pub async fn get(&self, id: &str) -> Result<Option<SessionRecord>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, username, expires_at, created_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(record)
    }

    /// Delete a session. Deleting a missing session is not an error.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session that expired at or before `now` (unix seconds).
    ///
    /// Returns the number of deleted sessions.
    pub async fn delete_expired(&self, now: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
