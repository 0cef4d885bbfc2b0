//! Password login: salt lookup, hash verification, session establishment.
//!
//! ```text
//! Unauthenticated -> SaltRequested -> HashVerification -> Authenticated
//!                                                      \-> Rejected
//! ```
//!
//! Verification decrypts the server-held password hash with the keypair
//! derived from the typed password. Only the right password yields a
//! private key that can open it, and the opened hash must then equal the
//! freshly stretched one.
//!
//! A mismatch, a failed decryption, and a failed lookup all end in the same
//! `InvalidCredentials` error so callers cannot tell whether an email
//! exists.
//!
//! Login and logout run one at a time per authenticator. The session write
//! and the state transition of one attempt are never interleaved with
//! another attempt's.

use crate::backend::CredentialBackend;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::registration::prepare_activation;
use crate::session::Session;
use keystone_crypto::{
    decrypt, derive_keypair, stretch, verify_password_hash, CryptoResult, DerivedKey, Keypair,
    PasswordHash, RsaPublicKey, Salt,
};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Where a login attempt currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    SaltRequested,
    HashVerification,
    Authenticated,
    Rejected,
}

/// Drives login, activation, and logout against a backend.
pub struct Authenticator<B: ?Sized> {
    backend: Arc<B>,
    config: AuthConfig,
    session: Session,
    state: RwLock<AuthState>,
    gate: Mutex<()>,
}

impl<B: CredentialBackend + ?Sized> Authenticator<B> {
    pub fn new(backend: Arc<B>, config: AuthConfig) -> Self {
        Self {
            backend,
            config,
            session: Session::new(),
            state: RwLock::new(AuthState::Unauthenticated),
            gate: Mutex::new(()),
        }
    }

    /// The session this authenticator writes to.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn state(&self) -> AuthState {
        *self.state.read().await
    }

    async fn transition(&self, next: AuthState) {
        let mut state = self.state.write().await;
        debug!("auth state {:?} -> {next:?}", *state);
        *state = next;
    }

    /// Logs in with email and password.
    ///
    /// Any previous session is cleared first. On failure no key material is
    /// retained and the error is always [`AuthError::InvalidCredentials`].
    /// A concurrent login or logout waits until this one has finished.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<()> {
        let _gate = self.gate.lock().await;
        self.session.logout().await;
        self.transition(AuthState::Unauthenticated).await;

        match self.verify(email, password).await {
            Ok((user_id, keypair)) => {
                self.session.establish(user_id, keypair).await;
                self.transition(AuthState::Authenticated).await;
                info!("login succeeded for user {user_id}");
                Ok(())
            }
            Err(e) => {
                debug!("login rejected: {e}");
                self.transition(AuthState::Rejected).await;
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn verify(&self, email: &str, password: &str) -> AuthResult<(i64, Keypair)> {
        self.transition(AuthState::SaltRequested).await;
        let salt = Salt::new(self.backend.fetch_salt(email).await?.salt);

        self.transition(AuthState::HashVerification).await;
        let password = Zeroizing::new(password.to_owned());
        let (hash, keypair) = tokio::task::spawn_blocking(move || derive_identity(&password, &salt))
            .await
            .map_err(|e| AuthError::Backend(format!("key derivation task failed: {e}")))??;

        let stored = self.backend.fetch_password_hash(email).await?;
        let opened = Zeroizing::new(decrypt(&stored.password_hash, &keypair.private)?);
        let expected = DerivedKey::from_hex(&opened)?;
        verify_password_hash(&expected, &hash)?;

        Ok((stored.user_id, keypair))
    }

    /// Sets the first password of an account and stores its key material.
    pub async fn activate(
        &self,
        email: &str,
        password: &str,
        admin_public_key: &RsaPublicKey,
    ) -> AuthResult<()> {
        let password = Zeroizing::new(password.to_owned());
        let admin_public_key = admin_public_key.clone();
        let min_len = self.config.min_password_len;

        let registration = tokio::task::spawn_blocking(move || {
            prepare_activation(&password, &admin_public_key, min_len)
        })
        .await
        .map_err(|e| AuthError::Backend(format!("key derivation task failed: {e}")))??;

        self.backend.activate(email, &registration.payload).await?;
        info!("account activated");
        Ok(())
    }

    /// Clears the session. Waits for in-flight decrypts and any login in
    /// progress to finish.
    pub async fn logout(&self) {
        let _gate = self.gate.lock().await;
        self.session.logout().await;
        self.transition(AuthState::Unauthenticated).await;
        info!("logged out");
    }
}

fn derive_identity(password: &str, salt: &Salt) -> CryptoResult<(PasswordHash, Keypair)> {
    let hash = stretch(password, salt)?;
    let keypair = derive_keypair(&hash)?;
    Ok((hash, keypair))
}
