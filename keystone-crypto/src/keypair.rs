//! Deterministic RSA keypairs derived from password hashes.
//!
//! The private key is never stored anywhere: it is re-derived from the
//! password hash on every login. Same key material in, same keypair out.

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::DerivedKey;
use crate::seed::seeded_rng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// RSA modulus size in bits.
pub const RSA_MODULUS_BITS: usize = 2048;

/// RSA public exponent.
pub const RSA_PUBLIC_EXPONENT: u64 = 65_537;

/// An RSA keypair. The private half zeroizes on drop (from `rsa`).
pub struct Keypair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

impl Keypair {
    /// Returns the public key as SPKI PEM.
    pub fn public_key_pem(&self) -> CryptoResult<String> {
        public_key_to_pem(&self.public)
    }

    /// Returns the private key as PKCS#8 PEM.
    pub fn private_key_pem(&self) -> CryptoResult<Zeroizing<String>> {
        self.private
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| CryptoError::InvalidKey(format!("private key export failed: {e}")))
    }

    /// Reconstructs a keypair from a PKCS#8 PEM private key.
    pub fn from_private_key_pem(pem: &str) -> CryptoResult<Self> {
        let private = RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|e| CryptoError::InvalidKey(format!("private key import failed: {e}")))?;
        let public = private.to_public_key();
        Ok(Self { private, public })
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("modulus_bits", &(self.public.size() * 8))
            .finish_non_exhaustive()
    }
}

/// Derives the keypair belonging to a password hash.
pub fn derive_keypair(material: &DerivedKey) -> CryptoResult<Keypair> {
    derive_keypair_from_bytes(material.as_bytes())
}

/// Derives a keypair from arbitrary non-empty key material.
///
/// See [`crate::seed`] for how material of other lengths is mapped.
pub fn derive_keypair_from_bytes(material: &[u8]) -> CryptoResult<Keypair> {
    let mut rng = seeded_rng(material)?;
    let exponent = BigUint::from(RSA_PUBLIC_EXPONENT);

    let private = RsaPrivateKey::new_with_exp(&mut rng, RSA_MODULUS_BITS, &exponent)
        .map_err(|e| CryptoError::KeyGeneration(format!("RSA generation failed: {e}")))?;
    let public = private.to_public_key();

    debug!("derived {RSA_MODULUS_BITS}-bit keypair");
    Ok(Keypair { private, public })
}

/// Encodes a public key as SPKI PEM.
pub fn public_key_to_pem(key: &RsaPublicKey) -> CryptoResult<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CryptoError::InvalidKey(format!("public key export failed: {e}")))
}

/// Parses an SPKI PEM public key.
pub fn public_key_from_pem(pem: &str) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem.trim())
        .map_err(|e| CryptoError::InvalidKey(format!("public key import failed: {e}")))
}
