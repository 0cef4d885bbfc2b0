//! Session key holder with an exclusive logout point.
//!
//! The session keypair is written once at login and read by every decrypt
//! until logout. Reads run under the read guard, and logout takes the
//! write guard, so no decrypt can still be using a keypair that logout
//! has cleared.

use crate::error::{AuthError, AuthResult};
use keystone_crypto::Keypair;
use keystone_identity::{decrypt_user, decrypt_user_view, User, UserRecord, UserView};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Key material of an authenticated user. Held in memory only.
#[derive(Debug)]
pub struct SessionKeys {
    user_id: i64,
    keypair: Keypair,
}

impl SessionKeys {
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

/// Shared handle to the current session. Clones refer to the same session.
#[derive(Clone, Default)]
pub struct Session {
    keys: Arc<RwLock<Option<SessionKeys>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn establish(&self, user_id: i64, keypair: Keypair) {
        let mut keys = self.keys.write().await;
        *keys = Some(SessionKeys { user_id, keypair });
        debug!("session established for user {user_id}");
    }

    /// Runs `f` with the session keys, holding off logout until it returns.
    pub async fn with_keys<R>(&self, f: impl FnOnce(&SessionKeys) -> R) -> AuthResult<R> {
        let keys = self.keys.read().await;
        keys.as_ref().map(f).ok_or(AuthError::NotAuthenticated)
    }

    /// Decrypts a user record with the session keypair.
    pub async fn decrypt_user(&self, record: &UserRecord) -> AuthResult<User> {
        self.with_keys(|keys| decrypt_user(record, &keys.keypair))
            .await?
            .map_err(AuthError::from)
    }

    /// Decrypts a user record for display with the session keypair.
    pub async fn decrypt_user_view(&self, record: &UserRecord) -> AuthResult<UserView> {
        self.with_keys(|keys| decrypt_user_view(record, &keys.keypair)).await
    }

    pub async fn user_id(&self) -> Option<i64> {
        self.keys.read().await.as_ref().map(|k| k.user_id)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.keys.read().await.is_some()
    }

    /// Drops the session keys. Waits for in-flight readers to finish.
    pub async fn logout(&self) {
        let mut keys = self.keys.write().await;
        if keys.take().is_some() {
            debug!("session keys cleared");
        }
    }
}
