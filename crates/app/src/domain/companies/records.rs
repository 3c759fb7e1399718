//! Company Records

use std::path::PathBuf;

use jiff::Timestamp;

use crate::{domain::companies::theme::Theme, uuids::TypedUuid};

/// Company UUID
pub type CompanyUuid = TypedUuid<CompanyRecord>;

/// Company Record
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub uuid: CompanyUuid,
    pub name: String,

    /// Registration / tax number, free text.
    pub tax_id: Option<String>,

    /// Canonical logo file owned by the asset store.
    pub logo_path: Option<PathBuf>,

    pub description: Option<String>,
    pub theme: Theme,

    /// Unique, URL-safe public identifier.
    pub slug: String,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
