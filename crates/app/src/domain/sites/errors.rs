//! Sites service errors.

use std::io;

use thiserror::Error;

use crate::domain::{
    collaborators::CollaboratorsServiceError, companies::CompaniesServiceError,
};

#[derive(Debug, Error)]
pub enum SitesServiceError {
    #[error("company not found")]
    NotFound,

    #[error("invalid site slug {0:?}")]
    InvalidSlug(String),

    #[error("could not write site files")]
    Io(#[from] io::Error),

    #[error("could not serialize chart data")]
    Serialize(#[from] serde_json::Error),

    #[error("could not load company")]
    Companies(#[source] CompaniesServiceError),

    #[error("could not load collaborators")]
    Collaborators(#[source] CollaboratorsServiceError),
}

impl From<CompaniesServiceError> for SitesServiceError {
    fn from(error: CompaniesServiceError) -> Self {
        match error {
            CompaniesServiceError::NotFound => Self::NotFound,
            error => Self::Companies(error),
        }
    }
}

impl From<CollaboratorsServiceError> for SitesServiceError {
    fn from(error: CollaboratorsServiceError) -> Self {
        match error {
            CollaboratorsServiceError::CompanyNotFound => Self::NotFound,
            error => Self::Collaborators(error),
        }
    }
}
