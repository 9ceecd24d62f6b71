//! Home page and the VIP lounge.

use axum::response::Html;

use crate::web::middleware::{CurrentUser, MaybeUser};
use crate::web::views;

/// GET / - Home page.
pub async fn home(MaybeUser(user): MaybeUser) -> Html<String> {
    views::home_page(user.as_ref())
}

/// GET /vip-lounge - Greeting for signed-in users.
pub async fn vip_lounge(CurrentUser(user): CurrentUser) -> String {
    format!("Welcome to the party {}.", user.username)
}
