//! Symmetric field encryption under project and member keys.
//!
//! The wire format is AES-256-CBC with PKCS#7 padding, where the IV is the
//! first 16 bytes of the key itself and there is no authentication tag.
//! Identical plaintexts under one key therefore produce identical
//! ciphertexts. The format is kept for compatibility with data already
//! written; [`FieldCipher`] is the seam where an authenticated, random-IV
//! mode can replace it without touching callers.
//!
//! Values are always JSON-encoded before encryption, strings included, and
//! decoding the plaintext back is part of decryption. Garbage produced by a
//! wrong key or a flipped byte fails to decode and surfaces as
//! [`CryptoError::Decryption`] instead of reaching the caller.

use crate::error::{CryptoError, CryptoResult};
use crate::kdf::DerivedKey;
use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

/// AES block size, which is also the IV size.
pub const BLOCK_SIZE: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// A raw symmetric cipher over byte strings.
pub trait FieldCipher {
    fn seal(&self, plaintext: &[u8], key: &DerivedKey) -> CryptoResult<Vec<u8>>;
    fn open(&self, ciphertext: &[u8], key: &DerivedKey) -> CryptoResult<Vec<u8>>;
}

/// AES-256-CBC with the key's leading bytes reused as IV.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyIvCbc;

impl FieldCipher for KeyIvCbc {
    fn seal(&self, plaintext: &[u8], key: &DerivedKey) -> CryptoResult<Vec<u8>> {
        let key_bytes = key.as_bytes();
        let encryptor = Aes256CbcEnc::new_from_slices(key_bytes, &key_bytes[..BLOCK_SIZE])
            .map_err(|e| CryptoError::Encryption(format!("cipher init failed: {e}")))?;
        Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    fn open(&self, ciphertext: &[u8], key: &DerivedKey) -> CryptoResult<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::Decryption(format!(
                "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
                ciphertext.len()
            )));
        }

        let key_bytes = key.as_bytes();
        let decryptor = Aes256CbcDec::new_from_slices(key_bytes, &key_bytes[..BLOCK_SIZE])
            .map_err(|e| CryptoError::Decryption(format!("cipher init failed: {e}")))?;
        decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::Decryption("invalid padding (wrong key or tampered data)".to_string()))
    }
}

/// Encrypts a value under `key` with the default field cipher.
pub fn encrypt_field<T: Serialize + ?Sized>(value: &T, key: &DerivedKey) -> CryptoResult<String> {
    encrypt_field_with(&KeyIvCbc, value, key)
}

/// Decrypts a value produced by [`encrypt_field`].
pub fn decrypt_field<T: DeserializeOwned>(ciphertext: &str, key: &DerivedKey) -> CryptoResult<T> {
    decrypt_field_with(&KeyIvCbc, ciphertext, key)
}

pub fn encrypt_field_with<C, T>(cipher: &C, value: &T, key: &DerivedKey) -> CryptoResult<String>
where
    C: FieldCipher + ?Sized,
    T: Serialize + ?Sized,
{
    let encoded = Zeroizing::new(serde_json::to_vec(value)?);
    let sealed = cipher.seal(&encoded, key)?;
    Ok(BASE64.encode(sealed))
}

pub fn decrypt_field_with<C, T>(cipher: &C, ciphertext: &str, key: &DerivedKey) -> CryptoResult<T>
where
    C: FieldCipher + ?Sized,
    T: DeserializeOwned,
{
    let raw = BASE64
        .decode(ciphertext.trim())
        .map_err(|_| CryptoError::Decryption("ciphertext is not valid base64".to_string()))?;
    let plaintext = Zeroizing::new(cipher.open(&raw, key)?);
    serde_json::from_slice(&plaintext)
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not a valid encoded value: {e}")))
}
