//! Sites service.

use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::{
    collaborators::CollaboratorsService,
    companies::{CompaniesService, records::CompanyUuid},
    sites::{errors::SitesServiceError, publisher::SitePublisher},
};

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSite {
    pub slug: String,
    pub public_url: String,

    /// Directory holding the published `index.html` and `assets/`.
    pub path: PathBuf,
}

/// URL a published site is served at.
///
/// Without a base the path is returned as-is, for sites served from the same
/// origin as the admin.
#[must_use]
pub fn public_url(public_base: Option<&str>, slug: &str) -> String {
    let base = public_base.map_or("", |base| base.trim().trim_end_matches('/'));

    format!("{base}/empresa/{slug}")
}

#[derive(Clone)]
pub struct LocalSitesService {
    companies: Arc<dyn CompaniesService>,
    collaborators: Arc<dyn CollaboratorsService>,
    publisher: SitePublisher,
}

impl LocalSitesService {
    #[must_use]
    pub fn new(
        companies: Arc<dyn CompaniesService>,
        collaborators: Arc<dyn CollaboratorsService>,
        publisher: SitePublisher,
    ) -> Self {
        Self {
            companies,
            collaborators,
            publisher,
        }
    }
}

#[async_trait]
impl SitesService for LocalSitesService {
    #[tracing::instrument(name = "sites.generate", skip(self, public_base), fields(company_uuid = %company))]
    async fn generate_site(
        &self,
        company: CompanyUuid,
        public_base: Option<String>,
    ) -> Result<GeneratedSite, SitesServiceError> {
        let record = self.companies.get_company(company).await?;
        let collaborators = self.collaborators.list_collaborators(company).await?;

        let path = self.publisher.publish(&record, collaborators).await?;
        let public_url = public_url(public_base.as_deref(), &record.slug);

        info!(slug = %record.slug, %public_url, "generated site");

        Ok(GeneratedSite {
            slug: record.slug,
            public_url,
            path,
        })
    }

    #[tracing::instrument(name = "sites.unpublish", skip(self))]
    async fn unpublish_site(&self, slug: &str) -> Result<bool, SitesServiceError> {
        self.publisher.unpublish(slug).await
    }
}

#[automock]
#[async_trait]
pub trait SitesService: Send + Sync {
    /// Render and publish the public org chart of `company`.
    async fn generate_site(
        &self,
        company: CompanyUuid,
        public_base: Option<String>,
    ) -> Result<GeneratedSite, SitesServiceError>;

    /// Remove a published site, returning whether one existed.
    async fn unpublish_site(&self, slug: &str) -> Result<bool, SitesServiceError>;
}
