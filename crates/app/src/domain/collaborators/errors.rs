//! Collaborators service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Collaborator service error variants.
#[derive(Debug, Error)]
pub enum CollaboratorsServiceError {
    /// Collaborator already exists.
    #[error("collaborator already exists")]
    AlreadyExists,

    /// Collaborator was not found in the given company.
    #[error("collaborator not found")]
    NotFound,

    /// Owning company does not exist.
    #[error("company not found")]
    CompanyNotFound,

    /// Manager does not exist in the same company.
    #[error("manager must be an existing collaborator of the same company")]
    InvalidManager,

    /// Collaborator named as its own manager.
    #[error("a collaborator cannot manage themselves")]
    SelfManagement,

    /// Manager already reports, directly or indirectly, to the collaborator.
    #[error("manager assignment would create a reporting cycle")]
    ManagerCycle,

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CollaboratorsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
