//! Authentication error types.

use keystone_crypto::CryptoError;
use keystone_identity::CodecError;
use thiserror::Error;

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur during login, activation, and session use.
///
/// [`crate::Authenticator::login`] only ever surfaces `InvalidCredentials`;
/// the other variants describe internal causes and backend calls made
/// outside the login path.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("password too short (min {min} characters)")]
    PasswordTooShort { min: usize },

    #[error("backend request failed: {0}")]
    Backend(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid configuration: {0}")]
    Config(String),
}
