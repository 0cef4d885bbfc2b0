//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in key derivation and field encryption.
///
/// `Stretch` and `KeyGeneration` indicate programmer error or a broken
/// generator and are fatal. `Decryption` is expected whenever a key is
/// wrong or a ciphertext was altered; callers turn it into a rejected login
/// or an unavailable field.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key stretching failed: {0}")]
    Stretch(String),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: {0}")]
    Decryption(String),

    #[error("derived value does not match expected value")]
    ProtocolMismatch,

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
