//! Codec error types.

use keystone_crypto::CryptoError;
use thiserror::Error;

/// Result type for record encoding and decoding.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while converting between domain records and their
/// encrypted wire form.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("record decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("field `{field}` failed: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: CryptoError,
    },
}

impl CodecError {
    pub(crate) fn field(field: &'static str) -> impl FnOnce(CryptoError) -> Self {
        move |source| Self::Field { field, source }
    }
}
