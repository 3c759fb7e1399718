//! Collaborator Records

use std::path::PathBuf;

use jiff::Timestamp;

use crate::{domain::companies::records::CompanyUuid, uuids::TypedUuid};

/// Collaborator UUID
pub type CollaboratorUuid = TypedUuid<CollaboratorRecord>;

/// Collaborator Record
#[derive(Debug, Clone, PartialEq)]
pub struct CollaboratorRecord {
    pub uuid: CollaboratorUuid,

    /// Owning company.
    pub company_uuid: CompanyUuid,

    pub name: String,

    /// Job title shown on the chart.
    pub role: String,

    pub email: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,

    /// Photo file. Points at the asset store for stored records and at a
    /// site-relative `assets/...` path once published.
    pub photo_path: Option<PathBuf>,

    /// Direct manager within the same company.
    pub manager_uuid: Option<CollaboratorUuid>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
