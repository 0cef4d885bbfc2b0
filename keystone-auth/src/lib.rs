//! Login and session key handling for Keystone.
//!
//! Provides:
//! - The password login flow (salt lookup, hash verification)
//! - Account activation (first password, escrow copy for the admin)
//! - A session holder that serializes decrypts against logout
//! - A reqwest client for the console's credential endpoints

pub mod api_client;
pub mod backend;
pub mod config;
pub mod error;
pub mod flow;
pub mod registration;
pub mod session;

pub use api_client::HttpBackend;
pub use backend::{CredentialBackend, PasswordHashResponse, SaltResponse};
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use flow::{AuthState, Authenticator};
pub use registration::{prepare_activation, prepare_activation_with_salt, ActivationPayload, Registration};
pub use session::{Session, SessionKeys};
