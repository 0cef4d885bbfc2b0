//! HTTP client for the console API's credential endpoints.
//!
//! Only the lookups the login and activation flows need live here. All
//! payloads are JSON; key material in them is already encrypted.

use crate::backend::{CredentialBackend, PasswordHashResponse, SaltResponse};
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::registration::ActivationPayload;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed [`CredentialBackend`].
pub struct HttpBackend {
    client: Client,
    config: AuthConfig,
}

impl HttpBackend {
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AuthError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, email: &str) -> AuthResult<T> {
        let url = format!("{}{}", self.config.base_url(), path);
        let resp = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await?;

        let resp = check_status(resp, path).await?;
        Ok(resp.json().await?)
    }
}

async fn check_status(resp: Response, path: &str) -> AuthResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    debug!("{path} returned {status}");
    if status == StatusCode::NOT_FOUND {
        return Err(AuthError::NotFound(path.to_string()));
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AuthError::Backend(format!("{path} returned {status}: {body}")))
}

#[async_trait]
impl CredentialBackend for HttpBackend {
    async fn fetch_salt(&self, email: &str) -> AuthResult<SaltResponse> {
        self.get_json("/api/auth/salt", email).await
    }

    async fn fetch_password_hash(&self, email: &str) -> AuthResult<PasswordHashResponse> {
        self.get_json("/api/auth/password-hash", email).await
    }

    async fn activate(&self, email: &str, payload: &ActivationPayload) -> AuthResult<()> {
        let path = "/api/auth/activate";
        let url = format!("{}{}", self.config.base_url(), path);
        let resp = self
            .client
            .post(&url)
            .query(&[("email", email)])
            .json(payload)
            .send()
            .await?;

        check_status(resp, path).await?;
        debug!("activation stored");
        Ok(())
    }
}
