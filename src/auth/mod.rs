//! Authentication module for Orchard.
//!
//! This module provides password hashing, user registration, credential
//! verification and server-side session management.

mod login;
mod password;
mod registration;
mod session;

pub use login::{authenticate, LoginError};
pub use password::{hash_password, verify_password, PasswordError};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use session::{AuthSession, SessionError, SessionManager, SessionUser};
