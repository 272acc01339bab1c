use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Which credential input the login form accepts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoginMode {
    /// Username and password.
    #[default]
    Password,
    /// A single combined `username:TOKEN` string.
    ApiToken,
}

impl LoginMode {
    pub fn secret_placeholder(self) -> &'static str {
        match self {
            LoginMode::Password => "Password",
            LoginMode::ApiToken => "Username:Token",
        }
    }

    pub fn help_title(self) -> &'static str {
        match self {
            LoginMode::Password => "Forgot Password?",
            LoginMode::ApiToken => "Show API Token",
        }
    }

    pub fn help_url(self) -> &'static str {
        match self {
            LoginMode::Password => "https://m.pinboard.in/password_reset/",
            LoginMode::ApiToken => "https://m.pinboard.in/settings/password",
        }
    }

    pub fn shows_username(self) -> bool {
        self == LoginMode::Password
    }
}

/// Credentials as typed by the user. Wiped from memory on drop.
#[derive(Debug, Clone, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    #[zeroize(skip)]
    pub mode: LoginMode,
    pub username: String,
    /// Password in password mode, `username:TOKEN` in token mode.
    pub secret: String,
}

/// Credentials persisted after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountCredentials {
    pub user_name: String,
    /// Always in `username:TOKEN` form.
    pub api_token: String,
}

/// Host application lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    Active,
    Inactive,
    Background,
}

/// Login returned by an autofill provider.
#[derive(Debug, Clone, PartialEq)]
pub struct AutofillLogin {
    pub username: String,
    pub password: String,
}
