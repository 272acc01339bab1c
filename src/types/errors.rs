use std::fmt;

// === RequestError ===

/// Errors raised when building a page request for the browser view.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The URL was empty.
    EmptyUrl,
    /// The URL could not be parsed as an absolute URL.
    InvalidUrl(String),
    /// The URL is absolute but not `http` or `https`.
    UnsupportedScheme(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::EmptyUrl => write!(f, "Page URL is empty"),
            RequestError::InvalidUrl(msg) => write!(f, "Invalid page URL: {}", msg),
            RequestError::UnsupportedScheme(scheme) => {
                write!(f, "Unsupported page URL scheme: {}", scheme)
            }
        }
    }
}

impl std::error::Error for RequestError {}

// === FetchError ===

/// Errors related to retrieving page content over the network.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The response body could not be read as text.
    Body(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Fetch network error: {}", msg),
            FetchError::Body(msg) => write!(f, "Fetch body error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === AuthError ===

/// Errors related to remote credential verification.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The request could not be completed.
    Network(String),
    /// The server answered with something other than a token.
    UnexpectedResponse(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(msg) => write!(f, "Authentication network error: {}", msg),
            AuthError::UnexpectedResponse(msg) => {
                write!(f, "Unexpected authentication response: {}", msg)
            }
        }
    }
}

impl std::error::Error for AuthError {}

// === LoginError ===

/// Errors surfaced to the user by the login form.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginError {
    /// Token mode was submitted without a token.
    MissingToken,
    /// Password mode was submitted without a username or password.
    MissingUsernameOrPassword,
    /// The server rejected the API token.
    IncorrectToken,
    /// The server rejected the username/password pair.
    IncorrectUsernameOrPassword,
    /// Verification could not reach the server.
    Unreachable(String),
    /// A submission is already in flight.
    AlreadySubmitting,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::MissingToken => write!(f, "Please Enter Your API Token"),
            LoginError::MissingUsernameOrPassword => {
                write!(f, "Please Enter Your Username and Password")
            }
            LoginError::IncorrectToken => write!(f, "Incorrect API Token"),
            LoginError::IncorrectUsernameOrPassword => {
                write!(f, "Incorrect Username or Password")
            }
            LoginError::Unreachable(msg) => write!(f, "Unable to reach server: {}", msg),
            LoginError::AlreadySubmitting => write!(f, "Login already in progress"),
        }
    }
}

impl std::error::Error for LoginError {}

// === AutofillError ===

/// Errors reported by a third-party credential autofill provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AutofillError {
    /// The user dismissed the provider without choosing a login.
    Cancelled,
    /// The provider is not installed or not reachable.
    Unavailable,
    /// Any other provider failure.
    Provider(String),
}

impl fmt::Display for AutofillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutofillError::Cancelled => write!(f, "Autofill cancelled by user"),
            AutofillError::Unavailable => write!(f, "Autofill provider unavailable"),
            AutofillError::Provider(msg) => write!(f, "Autofill provider error: {}", msg),
        }
    }
}

impl std::error::Error for AutofillError {}
