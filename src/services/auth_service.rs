//! Remote credential verification for Simplepin.
//!
//! Both login modes are checked against the same endpoint,
//! `GET {api_base}/user/api_token/?format=json`, which answers with the
//! account's API token when the credentials are accepted.

use std::future::Future;

use log::debug;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::types::account::{Credentials, LoginMode};
use crate::types::errors::AuthError;

/// Checks credentials with the bookmarking service.
pub trait CredentialVerifier: Send + Sync {
    /// Resolves to `Ok(Some(token))` when accepted and `Ok(None)` when the
    /// server rejects the credentials.
    fn verify(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Option<String>, AuthError>> + Send;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    result: String,
}

/// HTTP verifier for the Pinboard-compatible API.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: reqwest::Client,
    api_base_url: String,
}

impl AuthService {
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a verifier sharing an existing connection pool.
    pub fn with_client(client: reqwest::Client, api_base_url: &str) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn token_endpoint(&self) -> String {
        format!("{}/user/api_token/", self.api_base_url)
    }
}

impl CredentialVerifier for AuthService {
    async fn verify(&self, credentials: &Credentials) -> Result<Option<String>, AuthError> {
        let request = self
            .client
            .get(self.token_endpoint())
            .query(&[("format", "json")]);

        let request = match credentials.mode {
            LoginMode::Password => {
                request.basic_auth(&credentials.username, Some(&credentials.secret))
            }
            LoginMode::ApiToken => request.query(&[("auth_token", credentials.secret.trim())]),
        };

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        debug!("token check answered {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AuthError::UnexpectedResponse(format!("HTTP {}", status)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::UnexpectedResponse(e.to_string()))?;

        let token = body.result.trim().to_string();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token))
        }
    }
}
