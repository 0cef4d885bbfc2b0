//! Domain types shared by the codecs.

use crate::error::CodecResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Console role. Unrecognized wire values map to [`Role::Member`], the
/// least-privileged role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Member,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Member => "MEMBER",
        }
    }

    /// Parses a wire value, case-insensitively.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "MANAGER" => Role::Manager,
            "MEMBER" => Role::Member,
            _ => Role::default(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audited console activity. Unrecognized wire values map to
/// [`Activity::Unknown`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activity {
    Login,
    Logout,
    CreateUser,
    UpdateUser,
    DeleteUser,
    CreateProject,
    UpdateProject,
    DeleteProject,
    AddMember,
    RemoveMember,
    #[default]
    Unknown,
}

impl Activity {
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Login => "LOGIN",
            Activity::Logout => "LOGOUT",
            Activity::CreateUser => "CREATE_USER",
            Activity::UpdateUser => "UPDATE_USER",
            Activity::DeleteUser => "DELETE_USER",
            Activity::CreateProject => "CREATE_PROJECT",
            Activity::UpdateProject => "UPDATE_PROJECT",
            Activity::DeleteProject => "DELETE_PROJECT",
            Activity::AddMember => "ADD_MEMBER",
            Activity::RemoveMember => "REMOVE_MEMBER",
            Activity::Unknown => "UNKNOWN",
        }
    }

    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOGIN" => Activity::Login,
            "LOGOUT" => Activity::Logout,
            "CREATE_USER" => Activity::CreateUser,
            "UPDATE_USER" => Activity::UpdateUser,
            "DELETE_USER" => Activity::DeleteUser,
            "CREATE_PROJECT" => Activity::CreateProject,
            "UPDATE_PROJECT" => Activity::UpdateProject,
            "DELETE_PROJECT" => Activity::DeleteProject,
            "ADD_MEMBER" => Activity::AddMember,
            "REMOVE_MEMBER" => Activity::RemoveMember,
            _ => Activity::Unknown,
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field as shown in list and detail views.
///
/// A field that fails to decrypt is `Unavailable` rather than an error, so
/// one bad value never takes down the view that contains it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue<T> {
    Available(T),
    Unavailable,
}

impl<T> FieldValue<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, FieldValue::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            FieldValue::Available(v) => Some(v),
            FieldValue::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldValue<U> {
        match self {
            FieldValue::Available(v) => FieldValue::Available(f(v)),
            FieldValue::Unavailable => FieldValue::Unavailable,
        }
    }
}

impl<T, E> From<Result<T, E>> for FieldValue<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => FieldValue::Available(v),
            Err(_) => FieldValue::Unavailable,
        }
    }
}

impl<T: fmt::Display> fmt::Display for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Available(v) => v.fmt(f),
            FieldValue::Unavailable => f.write_str("[unavailable]"),
        }
    }
}

/// A console user with all identity fields in plaintext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub org_unit: String,
    pub role: Role,
    /// SPKI PEM of the user's derived public key.
    pub public_key: String,
    /// Hex password hash, or empty for an account that was never activated.
    pub password_hash: String,
}

/// Encrypted user record as exchanged with the backend.
///
/// Every field is required: a record missing one fails to decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub org_unit: String,
    pub role: String,
    pub public_key: String,
    pub password_hash: String,
}

impl UserRecord {
    /// Parses a backend record. A missing field is a [`CodecError::Decode`].
    pub fn from_json(json: &str) -> CodecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CodecResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A user as rendered in the console, field by field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserView {
    pub id: i64,
    pub name: FieldValue<String>,
    pub email: FieldValue<String>,
    pub org_unit: FieldValue<String>,
    pub role: FieldValue<Role>,
    pub public_key: String,
}
