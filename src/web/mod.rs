//! Web layer for Orchard.
//!
//! Server-rendered HTML pages for sign-up, sign-in and the fruit CRUD
//! flow, backed by cookie sessions.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod views;

pub use error::WebError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
