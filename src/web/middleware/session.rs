//! Session cookie handling and the access gate.

use std::time::Duration;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tracing::{debug, warn};

use crate::auth::{AuthSession, SessionUser};
use crate::config::SessionConfig;
use crate::web::handlers::AppState;

/// Where unauthenticated requests to protected routes are sent.
pub const SIGN_IN_PATH: &str = "/auth/sign-in";

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
    max_age: Duration,
}

impl SessionCookie {
    /// Build cookie settings from the session configuration.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.secure_cookie,
            max_age: Duration::from_secs(config.ttl_secs),
        }
    }

    /// Cookie name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cookie carrying a session token.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(
                i64::try_from(self.max_age.as_secs()).unwrap_or(i64::MAX),
            ))
            .build()
    }

    /// Cookie used to clear the session cookie.
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build((self.name.clone(), "")).path("/").build()
    }
}

/// The session resolved for the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<AuthSession>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Extractor for the signed-in user.
///
/// Rejects with a redirect to the sign-in page when there is no session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .and_then(|current| current.0.as_ref())
            .map(|session| CurrentUser(session.user.clone()))
            .ok_or_else(|| Redirect::to(SIGN_IN_PATH))
    }
}

/// Extractor for the signed-in user that never rejects.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentSession>()
            .and_then(|current| current.0.as_ref())
            .map(|session| session.user.clone());
        Ok(MaybeUser(user))
    }
}

/// Resolve the session cookie into a [`CurrentSession`] extension.
///
/// Missing, tampered, unknown and expired cookies all resolve to no
/// session. A storage failure is logged and also treated as no session.
pub async fn load_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = match jar.get(state.cookie.name()) {
        Some(cookie) => match state.sessions.get(cookie.value()).await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Failed to load session");
                None
            }
        },
        None => None,
    };

    request.extensions_mut().insert(CurrentSession(session));
    next.run(request).await
}

/// Access gate for protected routes.
///
/// Must run after [`load_session`].
pub async fn require_session(request: Request, next: Next) -> Response {
    let signed_in = matches!(
        request.extensions().get::<CurrentSession>(),
        Some(CurrentSession(Some(_)))
    );

    if !signed_in {
        debug!(path = %request.uri().path(), "Rejecting unauthenticated request");
        return Redirect::to(SIGN_IN_PATH).into_response();
    }

    next.run(request).await
}
