//! Method override for HTML forms.
//!
//! Forms can only submit GET and POST, so a POST carrying `_method=PUT`
//! (or `PATCH`/`DELETE`) in its query string is rewritten to that method.
//! This has to run before routing.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Query parameter naming the intended method.
pub const METHOD_PARAM: &str = "_method";

fn override_from_query(query: &str) -> Option<Method> {
    let raw = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == METHOD_PARAM).then_some(value)
    })?;
    let value = urlencoding::decode(raw).ok()?;

    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

/// Rewrite overridden POST requests.
pub async fn method_override(mut request: Request, next: Next) -> Response {
    if request.method() == Method::POST {
        if let Some(method) = request.uri().query().and_then(override_from_query) {
            debug!(path = %request.uri().path(), %method, "Method override");
            *request.method_mut() = method;
        }
    }
    next.run(request).await
}
