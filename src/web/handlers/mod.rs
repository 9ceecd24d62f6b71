//! Request handlers and the shared application state.

pub mod auth;
pub mod fruits;
pub mod home;

pub use auth::*;
pub use home::*;

use std::time::Duration;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::auth::SessionManager;
use crate::config::{PasswordConfig, SessionConfig};
use crate::db::Database;
use crate::web::middleware::SessionCookie;

/// Application state shared across handlers.
///
/// Built once at startup and cloned into each request; every field is
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Session store.
    pub sessions: SessionManager,
    /// Password hashing cost parameters.
    pub password: PasswordConfig,
    /// Session cookie attributes.
    pub cookie: SessionCookie,
    /// Cookie signing key.
    key: Key,
}

impl AppState {
    /// Create the application state.
    ///
    /// The cookie signing key is derived from the session secret.
    pub fn new(db: Database, session: &SessionConfig, password: PasswordConfig) -> Self {
        let sessions = SessionManager::new(
            db.pool().clone(),
            Duration::from_secs(session.ttl_secs),
        );
        let key = Key::from(Sha512::digest(session.secret.as_bytes()).as_slice());

        Self {
            db,
            sessions,
            password,
            cookie: SessionCookie::from_config(session),
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}
