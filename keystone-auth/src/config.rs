//! Authentication configuration.

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};

/// Configuration for the backend client and the login flow.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the console API (e.g., "https://console.example.com").
    pub api_base_url: String,

    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,

    /// Minimum password length accepted at activation.
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 30,
            min_password_len: 8,
        }
    }
}

impl AuthConfig {
    /// Rejects configurations the client cannot work with.
    pub fn validate(&self) -> AuthResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AuthError::Config(format!(
                "api_base_url must be an http(s) URL, got {:?}",
                self.api_base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AuthError::Config("request_timeout_secs must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    pub(crate) fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
