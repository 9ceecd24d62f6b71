//! Fruit CRUD handlers.
//!
//! Identifiers that are not integers behave like identifiers with no
//! matching record.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use tracing::info;

use crate::db::{Fruit, FruitForm, FruitRepository};
use crate::web::error::WebError;
use crate::web::middleware::CurrentUser;
use crate::web::views;

use super::AppState;

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

fn detail_path(raw_id: &str) -> String {
    format!("/fruits/{}", urlencoding::encode(raw_id))
}

async fn find(state: &AppState, raw_id: &str) -> Result<Option<Fruit>, WebError> {
    let Some(id) = parse_id(raw_id) else {
        return Ok(None);
    };
    Ok(FruitRepository::new(state.db.pool()).get_by_id(id).await?)
}

/// GET /fruits - List all fruits.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let fruits = FruitRepository::new(state.db.pool()).list().await?;
    Ok(views::fruit_index_page(&fruits))
}

/// GET /fruits/new - New fruit form.
pub async fn new_form() -> Html<String> {
    views::fruit_new_page()
}

/// GET /fruits/:id - Fruit detail.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let fruit = find(&state, &id).await?;
    Ok(views::fruit_show_page(fruit.as_ref()))
}

/// POST /fruits - Create a fruit.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, WebError> {
    let form = FruitForm::from_fields(fields);
    let fruit = FruitRepository::new(state.db.pool()).create(&form).await?;
    info!(fruit_id = fruit.id, user_id = user.id, "Fruit created");
    Ok(Redirect::to("/fruits"))
}

/// GET /fruits/:id/edit - Edit form.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, WebError> {
    let fruit = find(&state, &id).await?;
    Ok(views::fruit_edit_page(fruit.as_ref()))
}

/// PUT /fruits/:id - Update a fruit.
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, WebError> {
    if let Some(fruit_id) = parse_id(&id) {
        let form = FruitForm::from_fields(fields);
        if FruitRepository::new(state.db.pool())
            .update(fruit_id, &form)
            .await?
        {
            info!(fruit_id, user_id = user.id, "Fruit updated");
        }
    }
    Ok(Redirect::to(&detail_path(&id)))
}

/// DELETE /fruits/:id - Delete a fruit.
pub async fn destroy(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Redirect, WebError> {
    if let Some(fruit_id) = parse_id(&id) {
        if FruitRepository::new(state.db.pool()).delete(fruit_id).await? {
            info!(fruit_id, user_id = user.id, "Fruit deleted");
        }
    }
    Ok(Redirect::to("/fruits"))
}
