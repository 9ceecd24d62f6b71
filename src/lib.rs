//! Orchard - a small fruit catalogue with session authentication.
//!
//! Users register and sign in through HTML forms; signed-in users can
//! list, create, edit and delete fruits stored in SQLite.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, hash_password, register, verify_password, AuthSession, LoginError,
    PasswordError, RegistrationError, RegistrationRequest, SessionError, SessionManager,
    SessionUser,
};
pub use config::Config;
pub use db::{Database, Fruit, FruitForm, FruitRepository, NewUser, User, UserRepository};
pub use error::{OrchardError, Result};
pub use web::{create_router, AppState, WebServer};
