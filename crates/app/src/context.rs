//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    config::AppConfig,
    database::{self, Db},
    domain::{
        collaborators::{CollaboratorsService, SqliteCollaboratorsService},
        companies::{CompaniesService, SqliteCompaniesService},
        sites::{LocalSitesService, SitesService, publisher::SitePublisher},
    },
    uploads::AssetStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub companies: Arc<dyn CompaniesService>,
    pub collaborators: Arc<dyn CollaboratorsService>,
    pub sites: Arc<dyn SitesService>,
    pub assets: AssetStore,
    pub public_base_url: Option<String>,
}

impl AppContext {
    /// Connect to the database, apply migrations and wire the services.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or migrated.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let pool = database::connect(&config.database.database_url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(
            Db::new(pool),
            SitePublisher::new(&config.sites.sites_dir),
            AssetStore::new(&config.uploads.uploads_dir),
            config.sites.public_base_url.clone(),
        ))
    }

    #[must_use]
    pub fn from_db(
        db: Db,
        publisher: SitePublisher,
        assets: AssetStore,
        public_base_url: Option<String>,
    ) -> Self {
        let companies: Arc<dyn CompaniesService> = Arc::new(SqliteCompaniesService::new(db.clone()));
        let collaborators: Arc<dyn CollaboratorsService> =
            Arc::new(SqliteCollaboratorsService::new(db));

        let sites = Arc::new(LocalSitesService::new(
            Arc::clone(&companies),
            Arc::clone(&collaborators),
            publisher,
        ));

        Self {
            companies,
            collaborators,
            sites,
            assets,
            public_base_url,
        }
    }
}
