//! Companies service.

use std::future::Future;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        companies::{
            data::{CompanyUpdate, NewCompany},
            errors::CompaniesServiceError,
            records::{CompanyRecord, CompanyUuid},
            repository::{CompanyRow, SqliteCompaniesRepository},
            slugs,
        },
        non_blank,
    },
};

/// Attempts at reserving a slug before giving up with [`CompaniesServiceError::SlugConflict`].
pub const MAX_SLUG_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct SqliteCompaniesService {
    db: Db,
    repository: SqliteCompaniesRepository,
}

impl SqliteCompaniesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCompaniesRepository::new(),
        }
    }

    async fn try_create_company(
        &self,
        company: &NewCompany,
        name: &str,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let mut tx = self.db.begin_write().await?;

        let now = Timestamp::now();
        let base = slugs::base_slug(name, now);
        let slug = self.repository.allocate_slug(&mut tx, &base, None).await?;

        let created = self
            .repository
            .create_company(
                &mut tx,
                CompanyUuid::new(),
                CompanyRow {
                    name,
                    tax_id: non_blank(company.tax_id.as_deref()),
                    logo_path: company.logo_path.as_deref(),
                    description: non_blank(company.description.as_deref()),
                    theme: &company.theme,
                    slug: &slug,
                },
                now,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn try_update_company(
        &self,
        company: CompanyUuid,
        update: &CompanyUpdate,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let mut tx = self.db.begin_write().await?;

        let existing = self.repository.get_company(&mut tx, company).await?;

        let name = match update.name.as_deref().map(str::trim) {
            Some("") => return Err(CompaniesServiceError::MissingRequiredData),
            Some(name) => name,
            None => existing.name.as_str(),
        };

        let now = Timestamp::now();

        let slug = if name == existing.name {
            existing.slug.clone()
        } else {
            let base = slugs::base_slug(name, now);
            self.repository
                .allocate_slug(&mut tx, &base, Some(company))
                .await?
        };

        let updated = self
            .repository
            .update_company(
                &mut tx,
                company,
                CompanyRow {
                    name,
                    tax_id: non_blank(update.tax_id.as_deref()),
                    logo_path: update
                        .logo_path
                        .as_deref()
                        .or(existing.logo_path.as_deref()),
                    description: non_blank(update.description.as_deref()),
                    theme: update.theme.as_ref().unwrap_or(&existing.theme),
                    slug: &slug,
                },
                now,
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Re-run `attempt` while it fails because the slug it picked was taken by the
/// time it wrote. Writers are serialized by `BEGIN IMMEDIATE`, so this only
/// fires when another process bypasses that lock.
async fn with_slug_retry<T, F, Fut>(mut attempt: F) -> Result<T, CompaniesServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CompaniesServiceError>>,
{
    for n in 1..=MAX_SLUG_ATTEMPTS {
        match attempt().await {
            Err(error) if error.is_retryable() => {
                warn!(attempt = n, %error, "slug reservation collided, retrying");
            }
            result => return result,
        }
    }

    Err(CompaniesServiceError::SlugConflict(MAX_SLUG_ATTEMPTS))
}

#[async_trait]
impl CompaniesService for SqliteCompaniesService {
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError> {
        let mut tx = self.db.begin().await?;

        let companies = self.repository.list_companies(&mut tx).await?;

        tx.commit().await?;

        Ok(companies)
    }

    async fn get_company(
        &self,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let mut tx = self.db.begin().await?;

        let company = self.repository.get_company(&mut tx, company).await?;

        tx.commit().await?;

        Ok(company)
    }

    async fn get_company_by_slug(&self, slug: &str) -> Result<CompanyRecord, CompaniesServiceError> {
        let mut tx = self.db.begin().await?;

        let company = self.repository.get_company_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(company)
    }

    async fn allocate_slug(
        &self,
        name: &str,
        current: Option<CompanyUuid>,
    ) -> Result<String, CompaniesServiceError> {
        let mut tx = self.db.begin().await?;

        let base = slugs::base_slug(name, Timestamp::now());
        let slug = self.repository.allocate_slug(&mut tx, &base, current).await?;

        tx.commit().await?;

        Ok(slug)
    }

    #[tracing::instrument(name = "companies.create", skip(self, company), fields(slug = tracing::field::Empty))]
    async fn create_company(
        &self,
        company: NewCompany,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let name = company.name.trim();

        if name.is_empty() {
            return Err(CompaniesServiceError::MissingRequiredData);
        }

        let created = with_slug_retry(|| self.try_create_company(&company, name)).await?;

        tracing::Span::current().record("slug", tracing::field::display(&created.slug));
        info!(company_uuid = %created.uuid, "created company");

        Ok(created)
    }

    #[tracing::instrument(name = "companies.update", skip(self, update), fields(company_uuid = %company))]
    async fn update_company(
        &self,
        company: CompanyUuid,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, CompaniesServiceError> {
        let updated = with_slug_retry(|| self.try_update_company(company, &update)).await?;

        info!(slug = %updated.slug, "updated company");

        Ok(updated)
    }

    #[tracing::instrument(name = "companies.delete", skip(self), fields(company_uuid = %company))]
    async fn delete_company(&self, company: CompanyUuid) -> Result<(), CompaniesServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self.repository.delete_company(&mut tx, company).await?;

        if rows_affected == 0 {
            return Err(CompaniesServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted company and its collaborators");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CompaniesService: Send + Sync {
    /// Retrieves all companies ordered by name.
    async fn list_companies(&self) -> Result<Vec<CompanyRecord>, CompaniesServiceError>;

    /// Retrieve a single company.
    async fn get_company(&self, company: CompanyUuid)
    -> Result<CompanyRecord, CompaniesServiceError>;

    /// Retrieve a company by its public slug.
    async fn get_company_by_slug(&self, slug: &str) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Derive the slug `name` would receive now, without reserving it.
    ///
    /// Pass the company's own id as `current` when previewing a rename so its
    /// existing slug is not treated as a collision.
    async fn allocate_slug(
        &self,
        name: &str,
        current: Option<CompanyUuid>,
    ) -> Result<String, CompaniesServiceError>;

    /// Creates a company with a freshly allocated slug.
    async fn create_company(&self, company: NewCompany)
    -> Result<CompanyRecord, CompaniesServiceError>;

    /// Updates a company, re-deriving its slug when the name changes.
    async fn update_company(
        &self,
        company: CompanyUuid,
        update: CompanyUpdate,
    ) -> Result<CompanyRecord, CompaniesServiceError>;

    /// Deletes a company together with all of its collaborators.
    async fn delete_company(&self, company: CompanyUuid) -> Result<(), CompaniesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use crate::{
        domain::companies::theme::Theme,
        test::{TestContext, helpers::create_company},
    };

    use super::*;

    #[tokio::test]
    async fn create_company_derives_slug_from_name() -> TestResult {
        let ctx = TestContext::new().await;

        let company = ctx
            .companies
            .create_company(NewCompany {
                name: "  Café São Paulo  ".to_string(),
                tax_id: Some("12.345.678/0001-90".to_string()),
                description: Some("   ".to_string()),
                ..NewCompany::default()
            })
            .await?;

        assert_eq!(company.name, "Café São Paulo");
        assert_eq!(company.slug, "cafe-sao-paulo");
        assert_eq!(company.tax_id.as_deref(), Some("12.345.678/0001-90"));
        assert_eq!(company.description, None, "blank text is stored as absent");
        assert_eq!(company.theme, Theme::default());
        assert_eq!(company.created_at, company.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn colliding_names_get_numbered_slugs() {
        let ctx = TestContext::new().await;

        let first = create_company(&ctx, "Acme Corp").await;
        let second = create_company(&ctx, "Acme Corp").await;
        let third = create_company(&ctx, "ACME corp!").await;

        assert_eq!(first.slug, "acme-corp");
        assert_eq!(second.slug, "acme-corp-1");
        assert_eq!(third.slug, "acme-corp-2");
    }

    #[tokio::test]
    async fn name_without_letters_falls_back_to_timestamped_slug() {
        let ctx = TestContext::new().await;

        let company = create_company(&ctx, "!!!").await;

        assert!(
            company.slug.starts_with("empresa-"),
            "unexpected slug {}",
            company.slug
        );
    }

    #[tokio::test]
    async fn create_company_blank_name_returns_missing_required_data() {
        let ctx = TestContext::new().await;

        let result = ctx
            .companies
            .create_company(NewCompany {
                name: " \t ".to_string(),
                ..NewCompany::default()
            })
            .await;

        assert!(
            matches!(result, Err(CompaniesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
        assert!(ctx.companies.list_companies().await.is_ok_and(|c| c.is_empty()));
    }

    const CONCURRENT_WRITERS: usize = 12;

    async fn create_in_parallel(
        ctx: &TestContext,
        names: impl IntoIterator<Item = String>,
    ) -> TestResult<Vec<CompanyRecord>> {
        let handles: Vec<_> = names
            .into_iter()
            .map(|name| {
                let companies = ctx.companies.clone();

                tokio::spawn(async move {
                    companies
                        .create_company(NewCompany {
                            name,
                            ..NewCompany::default()
                        })
                        .await
                })
            })
            .collect();

        let mut created = Vec::with_capacity(handles.len());

        for handle in handles {
            created.push(handle.await??);
        }

        Ok(created)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_same_name_get_distinct_slugs() -> TestResult {
        let ctx = TestContext::new().await;

        let created = create_in_parallel(
            &ctx,
            (0..CONCURRENT_WRITERS).map(|_| "Globex".to_string()),
        )
        .await?;

        let mut slugs: Vec<String> = created.into_iter().map(|company| company.slug).collect();
        slugs.sort();

        let mut expected: Vec<String> = (0..CONCURRENT_WRITERS as u64)
            .map(|n| slugs::candidate("globex", n))
            .collect();
        expected.sort();

        assert_eq!(slugs, expected);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_with_distinct_names_all_succeed() -> TestResult {
        let ctx = TestContext::new().await;

        let created = create_in_parallel(
            &ctx,
            (0..CONCURRENT_WRITERS).map(|n| format!("Distinct {n}")),
        )
        .await?;

        for (n, company) in created.iter().enumerate() {
            assert_eq!(company.slug, format!("distinct-{n}"));
        }

        assert_eq!(ctx.companies.list_companies().await?.len(), CONCURRENT_WRITERS);

        Ok(())
    }

    #[tokio::test]
    async fn allocate_slug_accepts_own_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Initech").await;

        let own = ctx
            .companies
            .allocate_slug("Initech", Some(company.uuid))
            .await?;
        let other = ctx.companies.allocate_slug("Initech", None).await?;

        assert_eq!(own, "initech");
        assert_eq!(other, "initech-1");

        Ok(())
    }

    #[tokio::test]
    async fn update_with_same_name_keeps_slug() -> TestResult {
        let ctx = TestContext::new().await;
        create_company(&ctx, "Umbrella").await;
        let company = create_company(&ctx, "Umbrella").await;

        assert_eq!(company.slug, "umbrella-1");

        let updated = ctx
            .companies
            .update_company(
                company.uuid,
                CompanyUpdate {
                    name: Some(" Umbrella ".to_string()),
                    ..CompanyUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.slug, "umbrella-1");

        Ok(())
    }

    #[tokio::test]
    async fn rename_reallocates_slug() -> TestResult {
        let ctx = TestContext::new().await;
        create_company(&ctx, "Hooli").await;
        let company = create_company(&ctx, "Pied Piper").await;

        let updated = ctx
            .companies
            .update_company(
                company.uuid,
                CompanyUpdate {
                    name: Some("Hooli".to_string()),
                    ..CompanyUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Hooli");
        assert_eq!(updated.slug, "hooli-1");
        assert!(
            ctx.companies.get_company_by_slug("pied-piper").await.is_err(),
            "old slug must be released"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_omitted_name_theme_and_logo() -> TestResult {
        let ctx = TestContext::new().await;

        let company = ctx
            .companies
            .create_company(NewCompany {
                name: "Soylent".to_string(),
                tax_id: Some("123".to_string()),
                logo_path: Some(PathBuf::from("uploads/logos/soylent.png")),
                description: Some("Food".to_string()),
                theme: Theme::Gradient {
                    spec: "90deg, #fff, #000".to_string(),
                },
            })
            .await?;

        let updated = ctx
            .companies
            .update_company(
                company.uuid,
                CompanyUpdate {
                    description: Some("People".to_string()),
                    ..CompanyUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Soylent");
        assert_eq!(updated.slug, "soylent");
        assert_eq!(updated.theme, company.theme);
        assert_eq!(updated.logo_path, company.logo_path);
        assert_eq!(updated.tax_id, None, "omitted tax id is cleared");
        assert_eq!(updated.description.as_deref(), Some("People"));
        assert_eq!(updated.created_at, company.created_at);
        assert!(updated.updated_at >= company.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_blank_name_returns_missing_required_data() {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Vandelay").await;

        let result = ctx
            .companies
            .update_company(
                company.uuid,
                CompanyUpdate {
                    name: Some(String::new()),
                    ..CompanyUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CompaniesServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_company_returns_not_found() {
        let ctx = TestContext::new().await;
        let missing = CompanyUuid::new();

        let get = ctx.companies.get_company(missing).await;
        let by_slug = ctx.companies.get_company_by_slug("nobody").await;
        let update = ctx
            .companies
            .update_company(missing, CompanyUpdate::default())
            .await;
        let delete = ctx.companies.delete_company(missing).await;

        assert!(matches!(get, Err(CompaniesServiceError::NotFound)), "get: {get:?}");
        assert!(
            matches!(by_slug, Err(CompaniesServiceError::NotFound)),
            "by slug: {by_slug:?}"
        );
        assert!(
            matches!(update, Err(CompaniesServiceError::NotFound)),
            "update: {update:?}"
        );
        assert!(
            matches!(delete, Err(CompaniesServiceError::NotFound)),
            "delete: {delete:?}"
        );
    }

    #[tokio::test]
    async fn list_companies_orders_by_name() -> TestResult {
        let ctx = TestContext::new().await;
        create_company(&ctx, "Wayne Enterprises").await;
        create_company(&ctx, "Acme").await;
        create_company(&ctx, "Monsters Inc").await;

        let names: Vec<String> = ctx
            .companies
            .list_companies()
            .await?
            .into_iter()
            .map(|company| company.name)
            .collect();

        assert_eq!(names, ["Acme", "Monsters Inc", "Wayne Enterprises"]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_company_frees_its_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Stark").await;

        ctx.companies.delete_company(company.uuid).await?;

        let again = create_company(&ctx, "Stark").await;

        assert_eq!(again.slug, "stark");
        assert_ne!(again.uuid, company.uuid);

        Ok(())
    }
}
