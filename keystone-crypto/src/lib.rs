//! Key derivation and field encryption for Keystone.
//!
//! Provides the client-side crypto core:
//! - PBKDF2-HMAC-SHA256 password stretching
//! - Deterministic RSA keypairs seeded from password hashes
//! - RSA-OAEP encryption of identity fields
//! - AES-256-CBC encryption of project-scoped fields
//! - Project and member key derivation
//!
//! # Architecture
//!
//! No private key is ever stored. A user's password hash is
//! `stretch(password, salt)`, and their keypair is a pure function of that
//! hash, so logging in re-derives the same keypair every time.
//!
//! Project keys are derived from the admin's and manager's password hashes,
//! and member keys from a member's hash plus the project key. None of them
//! is ever transmitted.
//!
//! Every operation here is synchronous and free of shared state.

pub mod asymmetric;
mod error;
mod kdf;
pub mod keypair;
pub mod project;
pub mod seed;
pub mod symmetric;

pub use asymmetric::{decrypt, decrypt_value, encrypt, encrypt_value, max_plaintext_len};
pub use error::{CryptoError, CryptoResult};
pub use kdf::{
    stretch, stretch_bytes, verify_password_hash, DerivedKey, MemberKey, PasswordHash, ProjectKey,
    Salt, KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE,
};
pub use keypair::{
    derive_keypair, derive_keypair_from_bytes, public_key_from_pem, public_key_to_pem, Keypair,
    RSA_MODULUS_BITS, RSA_PUBLIC_EXPONENT,
};
pub use project::{derive_member_key, derive_project_key};
pub use rsa::{RsaPrivateKey, RsaPublicKey};
pub use symmetric::{decrypt_field, encrypt_field, FieldCipher, KeyIvCbc};
