//! Application configuration

use clap::Args;

use crate::config::{
    db::DatabaseConfig,
    logging::LoggingConfig,
    storage::{SitesConfig, UploadsConfig},
};

pub mod db;
pub mod logging;
pub mod storage;

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Published sites settings.
    #[command(flatten)]
    pub sites: SitesConfig,

    /// Uploaded media settings.
    #[command(flatten)]
    pub uploads: UploadsConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
