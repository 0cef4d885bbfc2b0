//! RSA-OAEP (SHA-256) encryption of short field values.
//!
//! Ciphertexts are base64 so they can travel inside JSON records. With a
//! 2048-bit modulus a single call can carry at most 190 bytes of plaintext.

use crate::error::{CryptoError, CryptoResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::Sha256;
use zeroize::Zeroizing;

/// OAEP padding cost with SHA-256: two digests plus two bytes.
const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Largest plaintext, in bytes, one call can encrypt under `public_key`.
pub fn max_plaintext_len(public_key: &RsaPublicKey) -> usize {
    public_key.size().saturating_sub(OAEP_SHA256_OVERHEAD)
}

/// Encrypts a string for the holder of `public_key`.
///
/// Fails with [`CryptoError::Encryption`] when the UTF-8 value is longer
/// than [`max_plaintext_len`].
pub fn encrypt(value: &str, public_key: &RsaPublicKey) -> CryptoResult<String> {
    encrypt_bytes(value.as_bytes(), public_key)
}

/// Decrypts a string produced by [`encrypt`].
pub fn decrypt(ciphertext: &str, private_key: &RsaPrivateKey) -> CryptoResult<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    String::from_utf8(plaintext.to_vec())
        .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))
}

/// Encrypts any serializable value by first encoding it as JSON.
pub fn encrypt_value<T: Serialize + ?Sized>(value: &T, public_key: &RsaPublicKey) -> CryptoResult<String> {
    let encoded = Zeroizing::new(serde_json::to_vec(value)?);
    encrypt_bytes(&encoded, public_key)
}

/// Decrypts and decodes a value produced by [`encrypt_value`].
pub fn decrypt_value<T: DeserializeOwned>(ciphertext: &str, private_key: &RsaPrivateKey) -> CryptoResult<T> {
    let plaintext = decrypt_bytes(ciphertext, private_key)?;
    serde_json::from_slice(&plaintext)
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not a valid encoded value: {e}")))
}

fn encrypt_bytes(plaintext: &[u8], public_key: &RsaPublicKey) -> CryptoResult<String> {
    let limit = max_plaintext_len(public_key);
    if plaintext.len() > limit {
        return Err(CryptoError::Encryption(format!(
            "plaintext is {} bytes, limit is {limit}",
            plaintext.len()
        )));
    }

    let ciphertext = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("OAEP encryption failed: {e}")))?;
    Ok(BASE64.encode(ciphertext))
}

fn decrypt_bytes(ciphertext: &str, private_key: &RsaPrivateKey) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let raw = BASE64
        .decode(ciphertext.trim())
        .map_err(|_| CryptoError::Decryption("ciphertext is not valid base64".to_string()))?;

    private_key
        .decrypt(Oaep::new::<Sha256>(), &raw)
        .map(Zeroizing::new)
        .map_err(|_| {
            CryptoError::Decryption("OAEP decryption failed (wrong key or tampered data)".to_string())
        })
}
