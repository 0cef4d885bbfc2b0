//! Storage backend collaborator used by the login and activation flows.

use crate::error::AuthResult;
use crate::registration::ActivationPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Response of the salt lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltResponse {
    pub salt: String,
}

/// Response of the encrypted password hash lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHashResponse {
    /// Hex password hash, RSA-OAEP encrypted under the user's derived key.
    pub password_hash: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
}

/// The backend calls the flows depend on.
///
/// Implementations may retry network failures. The crypto work around them
/// never retries.
#[async_trait]
pub trait CredentialBackend: Send + Sync {
    async fn fetch_salt(&self, email: &str) -> AuthResult<SaltResponse>;

    async fn fetch_password_hash(&self, email: &str) -> AuthResult<PasswordHashResponse>;

    /// Stores the key material of a freshly activated account.
    async fn activate(&self, email: &str, payload: &ActivationPayload) -> AuthResult<()>;
}
