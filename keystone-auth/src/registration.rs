//! Account activation: the first time a password is set.
//!
//! The stored password hash is encrypted under the user's own derived
//! public key, which is what login decrypts it with. A second copy is
//! encrypted under the admin's public key so the admin can later derive
//! project keys involving this user.

use crate::error::{AuthError, AuthResult};
use keystone_crypto::{
    derive_keypair, encrypt, public_key_to_pem, stretch, Keypair, PasswordHash, RsaPublicKey, Salt,
};
use serde::{Deserialize, Serialize};

/// What the backend stores for an activated account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationPayload {
    pub salt: String,
    /// SPKI PEM of the derived public key.
    pub public_key: String,
    /// Hex password hash encrypted under the user's own public key.
    pub password_hash: String,
    /// Hex password hash encrypted under the admin's public key.
    pub admin_password_hash: String,
}

/// Result of preparing an activation. Key material stays client-side.
#[derive(Debug)]
pub struct Registration {
    pub payload: ActivationPayload,
    pub password_hash: PasswordHash,
    pub keypair: Keypair,
}

/// Prepares an activation with a fresh random salt.
pub fn prepare_activation(
    password: &str,
    admin_public_key: &RsaPublicKey,
    min_password_len: usize,
) -> AuthResult<Registration> {
    prepare_activation_with_salt(password, Salt::random(), admin_public_key, min_password_len)
}

/// Prepares an activation with a caller-chosen salt.
pub fn prepare_activation_with_salt(
    password: &str,
    salt: Salt,
    admin_public_key: &RsaPublicKey,
    min_password_len: usize,
) -> AuthResult<Registration> {
    if password.chars().count() < min_password_len {
        return Err(AuthError::PasswordTooShort { min: min_password_len });
    }

    let password_hash = stretch(password, &salt)?;
    let keypair = derive_keypair(&password_hash)?;
    let hash_hex = password_hash.to_hex();

    let payload = ActivationPayload {
        salt: salt.as_str().to_string(),
        public_key: public_key_to_pem(&keypair.public)?,
        password_hash: encrypt(&hash_hex, &keypair.public)?,
        admin_password_hash: encrypt(&hash_hex, admin_public_key)?,
    };

    Ok(Registration {
        payload,
        password_hash,
        keypair,
    })
}
