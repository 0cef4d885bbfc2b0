//! Audit log payloads.
//!
//! Log storage happens elsewhere. This module only builds the records,
//! which carry the acting user's identity encrypted for the admin.

use crate::error::{CodecError, CodecResult};
use crate::types::{Activity, FieldValue};
use chrono::{DateTime, Utc};
use keystone_crypto::{decrypt, encrypt, Keypair, RsaPublicKey};
use serde::{Deserialize, Serialize};

/// Something a user did, before encryption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditEvent {
    pub user_id: i64,
    pub actor_email: String,
    pub activity: Activity,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    pub fn now(user_id: i64, actor_email: impl Into<String>, activity: Activity) -> Self {
        Self {
            user_id,
            actor_email: actor_email.into(),
            activity,
            occurred_at: Utc::now(),
        }
    }
}

/// Audit record as submitted to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRecord {
    #[serde(rename = "userID")]
    pub user_id: i64,
    /// Actor email, encrypted under the admin public key.
    pub actor: String,
    pub activity: String,
    pub timestamp: DateTime<Utc>,
}

/// An audit record as shown on the admin's log page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditLogView {
    pub user_id: i64,
    pub actor_email: FieldValue<String>,
    pub activity: Activity,
    pub timestamp: DateTime<Utc>,
}

pub fn build_log_record(event: &AuditEvent, admin_public_key: &RsaPublicKey) -> CodecResult<AuditLogRecord> {
    Ok(AuditLogRecord {
        user_id: event.user_id,
        actor: encrypt(&event.actor_email, admin_public_key).map_err(CodecError::field("actor"))?,
        activity: event.activity.as_str().to_string(),
        timestamp: event.occurred_at,
    })
}

pub fn read_log_record(record: &AuditLogRecord, admin: &Keypair) -> AuditLogView {
    AuditLogView {
        user_id: record.user_id,
        actor_email: decrypt(&record.actor, &admin.private).into(),
        activity: Activity::from_wire(&record.activity),
        timestamp: record.timestamp,
    }
}
