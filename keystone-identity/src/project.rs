//! Project records encrypted under the project key.

use crate::error::{CodecError, CodecResult};
use crate::types::FieldValue;
use keystone_crypto::{decrypt_field, encrypt_field, ProjectKey};
use serde::{Deserialize, Serialize};

/// A project with its descriptive fields in plaintext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub manager_id: i64,
}

/// Encrypted project record as exchanged with the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(rename = "projectID")]
    pub project_id: i64,
    pub name: String,
    pub description: String,
    #[serde(rename = "managerID")]
    pub manager_id: i64,
}

/// A project as rendered in the console.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectView {
    pub id: i64,
    pub name: FieldValue<String>,
    pub description: FieldValue<String>,
    pub manager_id: i64,
}

pub fn encrypt_project(project: &Project, key: &ProjectKey) -> CodecResult<ProjectRecord> {
    Ok(ProjectRecord {
        project_id: project.id,
        name: encrypt_field(&project.name, key).map_err(CodecError::field("name"))?,
        description: encrypt_field(&project.description, key)
            .map_err(CodecError::field("description"))?,
        manager_id: project.manager_id,
    })
}

pub fn decrypt_project(record: &ProjectRecord, key: &ProjectKey) -> CodecResult<Project> {
    Ok(Project {
        id: record.project_id,
        name: decrypt_field(&record.name, key).map_err(CodecError::field("name"))?,
        description: decrypt_field(&record.description, key)
            .map_err(CodecError::field("description"))?,
        manager_id: record.manager_id,
    })
}

pub fn decrypt_project_view(record: &ProjectRecord, key: &ProjectKey) -> ProjectView {
    ProjectView {
        id: record.project_id,
        name: decrypt_field::<String>(&record.name, key).into(),
        description: decrypt_field::<String>(&record.description, key).into(),
        manager_id: record.manager_id,
    }
}
