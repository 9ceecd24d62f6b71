//! Authentication handlers.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::auth::{authenticate, register, AuthSession, RegistrationRequest};
use crate::db::{User, UserRepository};
use crate::web::dto::{SignInForm, SignUpForm};
use crate::web::error::WebError;
use crate::web::middleware::CurrentSession;
use crate::web::views;

use super::AppState;

/// Replace any session on the request with a fresh one for `user`.
async fn start_session(
    state: &AppState,
    jar: SignedCookieJar,
    previous: Option<AuthSession>,
    user: &User,
) -> Result<SignedCookieJar, WebError> {
    if let Some(previous) = previous {
        state.sessions.destroy(&previous.token).await?;
    }
    let session = state.sessions.create(user).await?;
    Ok(jar.add(state.cookie.issue(session.token)))
}

/// GET /auth/sign-up - Registration form.
pub async fn sign_up_form() -> Html<String> {
    views::sign_up_page()
}

/// POST /auth/sign-up - Register and sign in.
pub async fn sign_up(
    State(state): State<AppState>,
    CurrentSession(previous): CurrentSession,
    jar: SignedCookieJar,
    Form(form): Form<SignUpForm>,
) -> Result<(SignedCookieJar, Redirect), WebError> {
    let request = RegistrationRequest::new(form.username, form.password, form.confirm_password);
    let repo = UserRepository::new(state.db.pool());
    let user = register(&repo, &request, &state.password).await?;

    let jar = start_session(&state, jar, previous, &user).await?;
    Ok((jar, Redirect::to("/")))
}

/// GET /auth/sign-in - Login form.
pub async fn sign_in_form() -> Html<String> {
    views::sign_in_page()
}

/// POST /auth/sign-in - Verify credentials and sign in.
pub async fn sign_in(
    State(state): State<AppState>,
    CurrentSession(previous): CurrentSession,
    jar: SignedCookieJar,
    Form(form): Form<SignInForm>,
) -> Result<(SignedCookieJar, Redirect), WebError> {
    let repo = UserRepository::new(state.db.pool());
    let user = authenticate(&repo, &form.username, &form.password).await?;

    let jar = start_session(&state, jar, previous, &user).await?;
    Ok((jar, Redirect::to("/")))
}

/// GET /auth/sign-out - Destroy the session.
pub async fn sign_out(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Redirect), WebError> {
    if let Some(session) = session {
        state.sessions.destroy(&session.token).await?;
    }
    Ok((jar.remove(state.cookie.removal()), Redirect::to("/")))
}
