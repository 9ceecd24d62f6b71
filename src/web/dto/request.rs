//! Request DTOs.

use serde::Deserialize;

/// Registration form.
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Login form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignInForm {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}
