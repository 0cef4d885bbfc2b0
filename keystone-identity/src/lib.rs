//! Encrypted identity records for Keystone.
//!
//! Converts console entities to and from the shape the backend stores:
//! - users, with every PII field sealed under a public key
//! - projects, with descriptive fields sealed under the project key
//! - audit log entries, with the actor sealed for the admin
//!
//! Strict decoders return errors; `*_view` decoders never fail and mark
//! undecryptable fields as [`FieldValue::Unavailable`].

pub mod audit;
pub mod codec;
pub mod error;
pub mod project;
pub mod types;

pub use audit::{build_log_record, read_log_record, AuditEvent, AuditLogRecord, AuditLogView};
pub use codec::{decrypt_user, decrypt_user_view, decrypt_user_views, encrypt_user};
pub use error::{CodecError, CodecResult};
pub use project::{decrypt_project, decrypt_project_view, encrypt_project, Project, ProjectRecord, ProjectView};
pub use types::{Activity, FieldValue, Role, User, UserRecord, UserView};
