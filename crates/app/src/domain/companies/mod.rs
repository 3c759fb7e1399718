//! Companies

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod slugs;
pub mod theme;

pub use errors::CompaniesServiceError;
pub use service::*;
