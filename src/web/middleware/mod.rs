//! Middleware for the web application.

pub mod method_override;
pub mod session;

pub use method_override::method_override;
pub use session::{
    load_session, require_session, CurrentSession, CurrentUser, MaybeUser, SessionCookie,
    SIGN_IN_PATH,
};
