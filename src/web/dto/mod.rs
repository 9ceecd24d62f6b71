//! Form payloads accepted by the web handlers.

pub mod request;

pub use request::*;
