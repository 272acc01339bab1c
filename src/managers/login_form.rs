//! Login form state machine.
//!
//! One form serves both credential modes (username + password, or a single
//! `username:TOKEN` string). The form only validates and tracks state;
//! verification goes through a [`CredentialVerifier`] and success is reported
//! as [`LoginEffect`] values for the host to apply.

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::services::auth_service::CredentialVerifier;
use crate::types::account::{
    AccountCredentials, AppState, AutofillLogin, Credentials, LoginMode,
};
use crate::types::errors::{AuthError, AutofillError, LoginError};

/// URL autofill providers are asked for a matching login.
pub const AUTOFILL_URL: &str = "https://pinboard.in";

/// Length of the token part of a `username:TOKEN` string.
const TOKEN_LENGTH: usize = 20;

static TOKEN_CHARS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new("[A-Z,0-9]").ok());

/// Third-party credential autofill (password manager extension).
pub trait AutofillProvider {
    fn is_available(&self) -> bool;
    fn find_login(&self, url: &str) -> Result<Option<AutofillLogin>, AutofillError>;
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginPhase {
    Editing,
    Submitting,
    Succeeded,
}

/// Side effects of a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoginEffect {
    /// Store these credentials.
    Persist { credentials: AccountCredentials },
    /// Leave the login screen.
    LoginSucceeded,
}

/// What the host needs to draw the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginViewModel {
    pub mode: LoginMode,
    pub username_visible: bool,
    pub secret_placeholder: &'static str,
    pub help_title: &'static str,
    pub submit_enabled: bool,
    pub busy: bool,
    pub autofill_visible: bool,
    pub error: Option<String>,
}

/// Trait defining the login form interface.
pub trait LoginFormTrait {
    fn mode(&self) -> LoginMode;
    fn set_mode(&mut self, mode: LoginMode);
    fn set_username(&mut self, username: &str);
    fn set_secret(&mut self, secret: &str);
    fn phase(&self) -> LoginPhase;
    fn error(&self) -> Option<&LoginError>;
    fn begin_submit(&mut self) -> Result<Credentials, LoginError>;
    fn complete_submit(
        &mut self,
        credentials: &Credentials,
        result: Result<Option<String>, AuthError>,
    ) -> Result<Vec<LoginEffect>, LoginError>;
    fn apply_autofill(&mut self, login: AutofillLogin) -> Result<Credentials, LoginError>;
    fn apply_clipboard(&mut self, clipboard: &str) -> bool;
    fn on_app_state_change(&mut self, next: AppState) -> bool;
    fn help_url(&self) -> &'static str;
    fn view_model(&self) -> LoginViewModel;
}

/// Login form for both credential modes.
#[derive(Debug)]
pub struct LoginForm {
    mode: LoginMode,
    username: String,
    secret: String,
    phase: LoginPhase,
    error: Option<LoginError>,
    autofill_available: bool,
    app_state: AppState,
}

impl LoginForm {
    pub fn new(mode: LoginMode) -> Self {
        Self {
            mode,
            username: String::new(),
            secret: String::new(),
            phase: LoginPhase::Editing,
            error: None,
            autofill_available: false,
            app_state: AppState::Active,
        }
    }

    /// Shows the autofill button when `provider` is usable.
    pub fn with_autofill(mut self, provider: &dyn AutofillProvider) -> Self {
        self.autofill_available = provider.is_available();
        self
    }

    fn validate(&self) -> Result<(), LoginError> {
        match self.mode {
            LoginMode::ApiToken if self.secret.trim().is_empty() => Err(LoginError::MissingToken),
            LoginMode::Password
                if self.username.trim().is_empty() || self.secret.is_empty() =>
            {
                Err(LoginError::MissingUsernameOrPassword)
            }
            _ => Ok(()),
        }
    }

    fn submit_enabled(&self) -> bool {
        self.phase == LoginPhase::Editing && self.validate().is_ok()
    }

    fn rejection(mode: LoginMode) -> LoginError {
        match mode {
            LoginMode::ApiToken => LoginError::IncorrectToken,
            LoginMode::Password => LoginError::IncorrectUsernameOrPassword,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(LoginMode::default())
    }
}

impl LoginFormTrait for LoginForm {
    fn mode(&self) -> LoginMode {
        self.mode
    }

    /// Switches credential mode. The secret field is cleared.
    fn set_mode(&mut self, mode: LoginMode) {
        if self.phase != LoginPhase::Editing {
            return;
        }
        self.mode = mode;
        self.secret.clear();
        self.error = None;
    }

    fn set_username(&mut self, username: &str) {
        if self.phase == LoginPhase::Editing {
            self.username = username.to_string();
        }
    }

    fn set_secret(&mut self, secret: &str) {
        if self.phase == LoginPhase::Editing {
            self.secret = secret.to_string();
        }
    }

    fn phase(&self) -> LoginPhase {
        self.phase
    }

    fn error(&self) -> Option<&LoginError> {
        self.error.as_ref()
    }

    /// Validates the fields and moves to `Submitting`.
    fn begin_submit(&mut self) -> Result<Credentials, LoginError> {
        if self.phase != LoginPhase::Editing {
            return Err(LoginError::AlreadySubmitting);
        }
        if let Err(e) = self.validate() {
            self.error = Some(e.clone());
            return Err(e);
        }
        self.error = None;
        self.phase = LoginPhase::Submitting;
        Ok(Credentials {
            mode: self.mode,
            username: self.username.trim().to_string(),
            secret: self.secret.clone(),
        })
    }

    /// Applies the verifier's answer. Failures return the form to editing.
    fn complete_submit(
        &mut self,
        credentials: &Credentials,
        result: Result<Option<String>, AuthError>,
    ) -> Result<Vec<LoginEffect>, LoginError> {
        if self.phase != LoginPhase::Submitting {
            debug!("ignoring login result outside of a submission");
            return Ok(Vec::new());
        }

        let error = match result {
            Ok(Some(token)) => {
                let account = derive_account(credentials, &token);
                info!("logged in as {}", account.user_name);
                self.phase = LoginPhase::Succeeded;
                self.secret.clear();
                return Ok(vec![
                    LoginEffect::Persist {
                        credentials: account,
                    },
                    LoginEffect::LoginSucceeded,
                ]);
            }
            Ok(None) => Self::rejection(credentials.mode),
            Err(e) => {
                warn!("login verification failed: {}", e);
                LoginError::Unreachable(e.to_string())
            }
        };

        self.phase = LoginPhase::Editing;
        self.error = Some(error.clone());
        Err(error)
    }

    /// Fills both fields from an autofill login and submits immediately.
    fn apply_autofill(&mut self, login: AutofillLogin) -> Result<Credentials, LoginError> {
        self.set_username(&login.username);
        self.set_secret(&login.password);
        self.begin_submit()
    }

    /// Prefills the token field when the clipboard looks like an API token.
    fn apply_clipboard(&mut self, clipboard: &str) -> bool {
        if self.phase != LoginPhase::Editing {
            return false;
        }
        match detect_api_token(clipboard) {
            Some(token) => {
                self.secret = token;
                true
            }
            None => false,
        }
    }

    /// Records the new app state. Returns true when the app came back to the
    /// foreground and the clipboard should be checked again.
    fn on_app_state_change(&mut self, next: AppState) -> bool {
        let returning = matches!(self.app_state, AppState::Inactive | AppState::Background)
            && next == AppState::Active;
        self.app_state = next;
        returning
    }

    fn help_url(&self) -> &'static str {
        self.mode.help_url()
    }

    fn view_model(&self) -> LoginViewModel {
        LoginViewModel {
            mode: self.mode,
            username_visible: self.mode.shows_username(),
            secret_placeholder: self.mode.secret_placeholder(),
            help_title: self.mode.help_title(),
            submit_enabled: self.submit_enabled(),
            busy: self.phase == LoginPhase::Submitting,
            autofill_visible: self.autofill_available,
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

/// Builds the stored credentials from a verified login.
///
/// Token mode keeps the typed token (whitespace removed) and takes the user
/// name from before the `:`; password mode joins the username with the
/// token returned by the server.
pub fn derive_account(credentials: &Credentials, token: &str) -> AccountCredentials {
    match credentials.mode {
        LoginMode::ApiToken => {
            let api_token: String = credentials
                .secret
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let user_name = api_token.split(':').next().unwrap_or_default().to_string();
            AccountCredentials {
                user_name,
                api_token,
            }
        }
        LoginMode::Password => AccountCredentials {
            user_name: credentials.username.clone(),
            api_token: format!("{}:{}", credentials.username, token),
        },
    }
}

/// Best-effort guess whether clipboard text is a `username:TOKEN` string.
///
/// Accepts trimmed text whose second `:`-separated part is exactly 20
/// characters and contains an uppercase letter, digit or comma. It does not
/// validate the token further.
pub fn detect_api_token(clipboard: &str) -> Option<String> {
    let trimmed = clipboard.trim();
    let token_part = trimmed.split(':').nth(1)?;
    let pattern = TOKEN_CHARS.as_ref()?;
    if token_part.chars().count() == TOKEN_LENGTH && pattern.is_match(token_part) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Validates, verifies and completes one submission.
pub async fn submit<V: CredentialVerifier>(
    form: &mut LoginForm,
    verifier: &V,
) -> Result<Vec<LoginEffect>, LoginError> {
    let credentials = form.begin_submit()?;
    let result = verifier.verify(&credentials).await;
    form.complete_submit(&credentials, result)
}

/// Asks `provider` for a login, fills the form and submits it.
///
/// Returns `Ok(None)` when the provider had nothing or the user cancelled.
pub async fn submit_with_autofill<V: CredentialVerifier>(
    form: &mut LoginForm,
    provider: &dyn AutofillProvider,
    verifier: &V,
) -> Result<Option<Vec<LoginEffect>>, LoginError> {
    let login = match provider.find_login(AUTOFILL_URL) {
        Ok(Some(login)) => login,
        Ok(None) | Err(AutofillError::Cancelled) => return Ok(None),
        Err(e) => {
            warn!("autofill lookup failed: {}", e);
            return Ok(None);
        }
    };
    let credentials = form.apply_autofill(login)?;
    let result = verifier.verify(&credentials).await;
    form.complete_submit(&credentials, result).map(Some)
}
