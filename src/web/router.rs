//! Router configuration.

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    fruits, home, sign_in, sign_in_form, sign_out, sign_up, sign_up_form, vip_lounge, AppState,
};
use super::middleware::{load_session, method_override, require_session};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    // Auth routes (no session required)
    let auth_routes = Router::new()
        .route("/sign-up", get(sign_up_form).post(sign_up))
        .route("/sign-in", get(sign_in_form).post(sign_in))
        .route("/sign-out", get(sign_out));

    let public_routes = Router::new()
        .route("/", get(home))
        .nest("/auth", auth_routes);

    // Everything below requires a session
    let protected_routes = Router::new()
        .route("/vip-lounge", get(vip_lounge))
        .route("/fruits", get(fruits::index).post(fruits::create))
        .route("/fruits/new", get(fruits::new_form))
        .route(
            "/fruits/:id",
            get(fruits::show)
                .put(fruits::update)
                .patch(fruits::update)
                .delete(fruits::destroy),
        )
        .route("/fruits/:id/edit", get(fruits::edit))
        .route_layer(middleware::from_fn(require_session));

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(create_health_router())
        .layer(middleware::from_fn_with_state(state.clone(), load_session))
        .with_state(state);

    // Method override has to see the request before the router matches it.
    Router::new().fallback_service(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(method_override))
            .service(app),
    )
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
