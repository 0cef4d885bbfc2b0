//! Field-by-field encryption of user records.
//!
//! Each identity field is sealed independently with RSA-OAEP, so a single
//! field can be re-encrypted or fail to decrypt on its own. The numeric id
//! and the public key travel in plaintext.

use crate::error::{CodecError, CodecResult};
use crate::types::{FieldValue, Role, User, UserRecord, UserView};
use keystone_crypto::{decrypt, encrypt, Keypair, RsaPrivateKey, RsaPublicKey};
use tracing::debug;

/// Encrypts a user for the holder of `public_key`.
///
/// An empty password hash stays empty: an account that has not been
/// activated yet has nothing to protect.
///
/// Each field is one RSA-OAEP block, so no field may exceed
/// [`keystone_crypto::max_plaintext_len`] UTF-8 bytes (190 for a 2048-bit key). A longer
/// field fails with [`CodecError::Field`] naming it.
pub fn encrypt_user(user: &User, public_key: &RsaPublicKey) -> CodecResult<UserRecord> {
    Ok(UserRecord {
        user_id: user.id,
        name: encrypt(&user.name, public_key).map_err(CodecError::field("name"))?,
        email: encrypt(&user.email, public_key).map_err(CodecError::field("email"))?,
        org_unit: encrypt(&user.org_unit, public_key).map_err(CodecError::field("orgUnit"))?,
        role: encrypt(user.role.as_str(), public_key).map_err(CodecError::field("role"))?,
        public_key: user.public_key.clone(),
        password_hash: if user.password_hash.is_empty() {
            String::new()
        } else {
            encrypt(&user.password_hash, public_key).map_err(CodecError::field("passwordHash"))?
        },
    })
}

/// Decrypts a user record with the session keypair.
///
/// Fails on the first field that does not decrypt. Views should use
/// [`decrypt_user_view`] instead.
pub fn decrypt_user(record: &UserRecord, keypair: &Keypair) -> CodecResult<User> {
    let key = &keypair.private;
    Ok(User {
        id: record.user_id,
        name: decrypt(&record.name, key).map_err(CodecError::field("name"))?,
        email: decrypt(&record.email, key).map_err(CodecError::field("email"))?,
        org_unit: decrypt(&record.org_unit, key).map_err(CodecError::field("orgUnit"))?,
        role: Role::from_wire(&decrypt(&record.role, key).map_err(CodecError::field("role"))?),
        public_key: record.public_key.clone(),
        password_hash: if record.password_hash.is_empty() {
            String::new()
        } else {
            decrypt(&record.password_hash, key).map_err(CodecError::field("passwordHash"))?
        },
    })
}

/// Decrypts a user record for display, marking undecryptable fields
/// unavailable instead of failing.
pub fn decrypt_user_view(record: &UserRecord, keypair: &Keypair) -> UserView {
    let key = &keypair.private;
    UserView {
        id: record.user_id,
        name: view_field(record.user_id, "name", &record.name, key),
        email: view_field(record.user_id, "email", &record.email, key),
        org_unit: view_field(record.user_id, "orgUnit", &record.org_unit, key),
        role: view_field(record.user_id, "role", &record.role, key).map(|r| Role::from_wire(&r)),
        public_key: record.public_key.clone(),
    }
}

/// Decrypts a page of user records for a list view.
pub fn decrypt_user_views(records: &[UserRecord], keypair: &Keypair) -> Vec<UserView> {
    records.iter().map(|r| decrypt_user_view(r, keypair)).collect()
}

fn view_field(user_id: i64, field: &'static str, ciphertext: &str, key: &RsaPrivateKey) -> FieldValue<String> {
    match decrypt(ciphertext, key) {
        Ok(value) => FieldValue::Available(value),
        Err(e) => {
            debug!("user {user_id}: field {field} unavailable: {e}");
            FieldValue::Unavailable
        }
    }
}
