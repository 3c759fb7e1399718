//! Collaborator Data

use std::path::PathBuf;

use crate::domain::collaborators::records::CollaboratorUuid;

/// New Collaborator Data
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCollaborator {
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub photo_path: Option<PathBuf>,
    pub manager_uuid: Option<CollaboratorUuid>,
}

/// Collaborator Update Data
///
/// `name`, `role` and `photo_path` keep the stored value when `None`; the
/// contact fields and `manager_uuid` are always replaced, so omitting the
/// manager turns the collaborator into a root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollaboratorUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub photo_path: Option<PathBuf>,
    pub manager_uuid: Option<CollaboratorUuid>,
}
