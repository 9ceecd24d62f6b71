//! Test helpers for web integration tests.

#![allow(dead_code)]

use axum::http::StatusCode;
use axum_test::TestServer;
use axum_extra::extract::cookie::Cookie;

use orchard::config::{Config, PasswordConfig};
use orchard::{create_router, AppState, Database};

/// Session cookie name used by the default configuration.
pub const SESSION_COOKIE: &str = "orchard.sid";

/// Create a test configuration with cheap password hashing.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.session.secret = "test-secret-key-for-testing-only-0123456789abcdef".to_string();
    config.password = PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    config
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    create_test_server_with(create_test_config()).await
}

/// Create a test server from a specific configuration.
pub async fn create_test_server_with(config: Config) -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let state = AppState::new(db.clone(), &config.session, config.password);
    let router = create_router(state);

    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Register a user and return the session cookie from the response.
pub async fn sign_up(server: &TestServer, username: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/auth/sign-up")
        .form(&[
            ("username", username),
            ("password", password),
            ("confirmPassword", password),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE)
}

/// Sign in and return the session cookie from the response.
pub async fn sign_in(server: &TestServer, username: &str, password: &str) -> Cookie<'static> {
    let response = server
        .post("/auth/sign-in")
        .form(&[("username", username), ("password", password)])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    response.cookie(SESSION_COOKIE)
}

/// Location header of a redirect response.
pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("location header is not ASCII")
        .to_string()
}
