//! In-memory credential backend for flow tests.

use async_trait::async_trait;
use keystone_auth::{
    ActivationPayload, AuthError, AuthResult, CredentialBackend, PasswordHashResponse, SaltResponse,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct StoredAccount {
    pub user_id: i64,
    pub salt: String,
    pub password_hash: String,
}

#[derive(Default)]
pub struct MemoryBackend {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    next_id: Mutex<i64>,
    fail_hash_lookup: Mutex<bool>,
    salt_delays: Mutex<HashMap<String, Duration>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1),
            ..Self::default()
        }
    }

    pub fn insert(&self, email: &str, account: StoredAccount) {
        self.accounts.lock().unwrap().insert(email.to_string(), account);
    }

    pub fn account(&self, email: &str) -> Option<StoredAccount> {
        self.accounts.lock().unwrap().get(email).cloned()
    }

    pub fn set_fail_hash_lookup(&self, fail: bool) {
        *self.fail_hash_lookup.lock().unwrap() = fail;
    }

    /// Makes salt lookups for `email` stall for `delay` before answering.
    pub fn delay_salt_lookup(&self, email: &str, delay: Duration) {
        self.salt_delays.lock().unwrap().insert(email.to_string(), delay);
    }
}

#[async_trait]
impl CredentialBackend for MemoryBackend {
    async fn fetch_salt(&self, email: &str) -> AuthResult<SaltResponse> {
        let delay = self.salt_delays.lock().unwrap().get(email).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.account(email)
            .map(|a| SaltResponse { salt: a.salt })
            .ok_or_else(|| AuthError::NotFound(email.to_string()))
    }

    async fn fetch_password_hash(&self, email: &str) -> AuthResult<PasswordHashResponse> {
        if *self.fail_hash_lookup.lock().unwrap() {
            return Err(AuthError::Backend("connection reset".into()));
        }
        self.account(email)
            .map(|a| PasswordHashResponse {
                password_hash: a.password_hash,
                user_id: a.user_id,
            })
            .ok_or_else(|| AuthError::NotFound(email.to_string()))
    }

    async fn activate(&self, email: &str, payload: &ActivationPayload) -> AuthResult<()> {
        let user_id = {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        self.insert(
            email,
            StoredAccount {
                user_id,
                salt: payload.salt.clone(),
                password_hash: payload.password_hash.clone(),
            },
        );
        Ok(())
    }
}
