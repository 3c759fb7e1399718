//! Companies service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompaniesServiceError {
    #[error("company already exists")]
    AlreadyExists,

    #[error("company not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("could not reserve a unique slug after {0} attempts")]
    SlugConflict(u32),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CompaniesServiceError {
    /// Whether the write lost a slug to a concurrent writer and may succeed
    /// when re-run from the slug lookup.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AlreadyExists)
    }
}

impl From<Error> for CompaniesServiceError {
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
