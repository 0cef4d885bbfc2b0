//! Password stretching with PBKDF2-HMAC-SHA256.
//!
//! Every key in the system (password hashes, project keys, member keys) is
//! the output of [`stretch_bytes`]. The iteration count and output length
//! are fixed: changing either changes every identity ever issued.

use crate::error::{CryptoError, CryptoResult};
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Size of derived key material in bytes (256 bits).
pub const KEY_SIZE: usize = 32;

/// Size of freshly generated salts in bytes, before hex encoding.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Fixed-length key material produced by stretching.
///
/// Equality is constant-time. Debug output never shows the bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

/// A user's stretched password.
pub type PasswordHash = DerivedKey;

/// Symmetric key shared implicitly by a project's admin and manager.
pub type ProjectKey = DerivedKey;

/// Per-member key derived from a member's password hash and the project key.
pub type MemberKey = DerivedKey;

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex form. This is the representation that gets encrypted
    /// and stored server-side.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }

    /// Parses the hex form produced by [`DerivedKey::to_hex`].
    pub fn from_hex(encoded: &str) -> CryptoResult<Self> {
        let bytes = Zeroizing::new(
            hex::decode(encoded.trim())
                .map_err(|e| CryptoError::InvalidKey(format!("key is not valid hex: {e}")))?,
        );
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for DerivedKey {}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}

/// Per-user salt, persisted in plaintext next to the account.
///
/// The text form is fed to PBKDF2 byte-for-byte, so salts issued by other
/// clients (any string) keep working.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Salt(String);

impl Salt {
    /// Generates a new salt from the OS CSPRNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for Salt {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stretches a password with its salt into a [`PasswordHash`].
pub fn stretch(password: &str, salt: &Salt) -> CryptoResult<PasswordHash> {
    stretch_bytes(password.as_bytes(), salt.as_bytes())
}

/// Stretches arbitrary secret bytes. An empty salt is allowed.
pub fn stretch_bytes(secret: &[u8], salt: &[u8]) -> CryptoResult<DerivedKey> {
    stretch_with_iterations(secret, salt, PBKDF2_ITERATIONS)
}

fn stretch_with_iterations(secret: &[u8], salt: &[u8], iterations: u32) -> CryptoResult<DerivedKey> {
    if iterations == 0 {
        return Err(CryptoError::Stretch("iteration count must be non-zero".to_string()));
    }

    let mut out = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(secret, salt, iterations, &mut out);
    let key = DerivedKey::from_bytes(out);
    out.zeroize();
    Ok(key)
}

/// Checks a freshly derived hash against the expected one in constant time.
pub fn verify_password_hash(expected: &PasswordHash, candidate: &PasswordHash) -> CryptoResult<()> {
    if expected == candidate {
        Ok(())
    } else {
        Err(CryptoError::ProtocolMismatch)
    }
}
