//! Collaborators service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        collaborators::{
            data::{CollaboratorUpdate, NewCollaborator},
            errors::CollaboratorsServiceError,
            records::{CollaboratorRecord, CollaboratorUuid},
            repository::{CollaboratorRow, SqliteCollaboratorsRepository},
        },
        companies::records::CompanyUuid,
        non_blank,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCollaboratorsService {
    db: Db,
    repository: SqliteCollaboratorsRepository,
}

impl SqliteCollaboratorsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCollaboratorsRepository::new(),
        }
    }

    /// Enforce the manager rules for `collaborator` (`None` while creating):
    /// same company, not itself, and no reporting cycle.
    async fn validate_manager(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        collaborator: Option<CollaboratorUuid>,
        manager: Option<CollaboratorUuid>,
    ) -> Result<(), CollaboratorsServiceError> {
        let Some(manager) = manager else {
            return Ok(());
        };

        if Some(manager) == collaborator {
            return Err(CollaboratorsServiceError::SelfManagement);
        }

        match self
            .repository
            .get_collaborator(tx, company, manager)
            .await
        {
            Ok(_) => {}
            Err(sqlx::Error::RowNotFound) => return Err(CollaboratorsServiceError::InvalidManager),
            Err(error) => return Err(error.into()),
        }

        if let Some(collaborator) = collaborator
            && self
                .repository
                .chain_contains(tx, manager, collaborator)
                .await?
        {
            return Err(CollaboratorsServiceError::ManagerCycle);
        }

        Ok(())
    }
}

fn required(value: &str) -> Result<&str, CollaboratorsServiceError> {
    non_blank(Some(value)).ok_or(CollaboratorsServiceError::MissingRequiredData)
}

#[async_trait]
impl CollaboratorsService for SqliteCollaboratorsService {
    async fn list_collaborators(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<CollaboratorRecord>, CollaboratorsServiceError> {
        let mut tx = self.db.begin().await?;

        if !self.repository.company_exists(&mut tx, company).await? {
            return Err(CollaboratorsServiceError::CompanyNotFound);
        }

        let collaborators = self
            .repository
            .list_collaborators(&mut tx, company)
            .await?;

        tx.commit().await?;

        Ok(collaborators)
    }

    async fn get_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError> {
        let mut tx = self.db.begin().await?;

        let collaborator = self
            .repository
            .get_collaborator(&mut tx, company, collaborator)
            .await?;

        tx.commit().await?;

        Ok(collaborator)
    }

    #[tracing::instrument(
        name = "collaborators.create",
        skip(self, collaborator),
        fields(company_uuid = %company)
    )]
    async fn create_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: NewCollaborator,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError> {
        let name = required(&collaborator.name)?;
        let role = required(&collaborator.role)?;

        let mut tx = self.db.begin_write().await?;

        if !self.repository.company_exists(&mut tx, company).await? {
            return Err(CollaboratorsServiceError::CompanyNotFound);
        }

        self.validate_manager(&mut tx, company, None, collaborator.manager_uuid)
            .await?;

        let created = self
            .repository
            .create_collaborator(
                &mut tx,
                company,
                CollaboratorUuid::new(),
                CollaboratorRow {
                    name,
                    role,
                    email: non_blank(collaborator.email.as_deref()),
                    department: non_blank(collaborator.department.as_deref()),
                    phone: non_blank(collaborator.phone.as_deref()),
                    photo_path: collaborator.photo_path.as_deref(),
                    manager_uuid: collaborator.manager_uuid,
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        info!(collaborator_uuid = %created.uuid, "created collaborator");

        Ok(created)
    }

    #[tracing::instrument(
        name = "collaborators.update",
        skip(self, update),
        fields(company_uuid = %company, collaborator_uuid = %collaborator)
    )]
    async fn update_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
        update: CollaboratorUpdate,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let existing = self
            .repository
            .get_collaborator(&mut tx, company, collaborator)
            .await?;

        let name = match update.name.as_deref() {
            Some(name) => required(name)?,
            None => existing.name.as_str(),
        };

        let role = match update.role.as_deref() {
            Some(role) => required(role)?,
            None => existing.role.as_str(),
        };

        self.validate_manager(&mut tx, company, Some(collaborator), update.manager_uuid)
            .await?;

        let updated = self
            .repository
            .update_collaborator(
                &mut tx,
                company,
                collaborator,
                CollaboratorRow {
                    name,
                    role,
                    email: non_blank(update.email.as_deref()),
                    department: non_blank(update.department.as_deref()),
                    phone: non_blank(update.phone.as_deref()),
                    photo_path: update
                        .photo_path
                        .as_deref()
                        .or(existing.photo_path.as_deref()),
                    manager_uuid: update.manager_uuid,
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        info!("updated collaborator");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "collaborators.delete",
        skip(self),
        fields(company_uuid = %company, collaborator_uuid = %collaborator)
    )]
    async fn delete_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<(), CollaboratorsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self
            .repository
            .delete_collaborator(&mut tx, company, collaborator)
            .await?;

        if rows_affected == 0 {
            return Err(CollaboratorsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("deleted collaborator; direct reports are now roots");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CollaboratorsService: Send + Sync {
    /// Retrieves a company's collaborators ordered by name.
    async fn list_collaborators(
        &self,
        company: CompanyUuid,
    ) -> Result<Vec<CollaboratorRecord>, CollaboratorsServiceError>;

    /// Retrieve a single collaborator of `company`.
    async fn get_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError>;

    /// Adds a collaborator to `company`.
    async fn create_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: NewCollaborator,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError>;

    /// Updates a collaborator of `company`.
    async fn update_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
        update: CollaboratorUpdate,
    ) -> Result<CollaboratorRecord, CollaboratorsServiceError>;

    /// Removes a collaborator; their direct reports lose their manager.
    async fn delete_collaborator(
        &self,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<(), CollaboratorsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use crate::{
        domain::companies::CompaniesService,
        test::{
            TestContext,
            helpers::{create_collaborator, create_company, new_collaborator},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_collaborator_under_manager() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let boss = create_collaborator(&ctx, company.uuid, "Beatriz", None).await;

        let report = ctx
            .collaborators
            .create_collaborator(
                company.uuid,
                NewCollaborator {
                    name: " Caio ".to_string(),
                    role: "Developer".to_string(),
                    email: Some("caio@acme.test".to_string()),
                    phone: Some(String::new()),
                    manager_uuid: Some(boss.uuid),
                    ..NewCollaborator::default()
                },
            )
            .await?;

        assert_eq!(report.name, "Caio");
        assert_eq!(report.company_uuid, company.uuid);
        assert_eq!(report.manager_uuid, Some(boss.uuid));
        assert_eq!(report.phone, None);

        let fetched = ctx
            .collaborators
            .get_collaborator(company.uuid, report.uuid)
            .await?;

        assert_eq!(fetched, report);

        Ok(())
    }

    #[tokio::test]
    async fn create_collaborator_requires_name_and_role() {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;

        let no_name = ctx
            .collaborators
            .create_collaborator(company.uuid, new_collaborator("  ", None))
            .await;

        let no_role = ctx
            .collaborators
            .create_collaborator(
                company.uuid,
                NewCollaborator {
                    name: "Dora".to_string(),
                    ..NewCollaborator::default()
                },
            )
            .await;

        assert!(
            matches!(no_name, Err(CollaboratorsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {no_name:?}"
        );
        assert!(
            matches!(no_role, Err(CollaboratorsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {no_role:?}"
        );
    }

    #[tokio::test]
    async fn unknown_company_returns_company_not_found() {
        let ctx = TestContext::new().await;
        let missing = CompanyUuid::new();

        let create = ctx
            .collaborators
            .create_collaborator(missing, new_collaborator("Eva", None))
            .await;
        let list = ctx.collaborators.list_collaborators(missing).await;

        assert!(
            matches!(create, Err(CollaboratorsServiceError::CompanyNotFound)),
            "create: {create:?}"
        );
        assert!(
            matches!(list, Err(CollaboratorsServiceError::CompanyNotFound)),
            "list: {list:?}"
        );
    }

    #[tokio::test]
    async fn manager_must_belong_to_same_company() {
        let ctx = TestContext::new().await;
        let acme = create_company(&ctx, "Acme").await;
        let globex = create_company(&ctx, "Globex").await;
        let outsider = create_collaborator(&ctx, globex.uuid, "Otto", None).await;

        let cross_company = ctx
            .collaborators
            .create_collaborator(acme.uuid, new_collaborator("Fabio", Some(outsider.uuid)))
            .await;

        let dangling = ctx
            .collaborators
            .create_collaborator(
                acme.uuid,
                new_collaborator("Fabio", Some(CollaboratorUuid::new())),
            )
            .await;

        assert!(
            matches!(cross_company, Err(CollaboratorsServiceError::InvalidManager)),
            "expected InvalidManager, got {cross_company:?}"
        );
        assert!(
            matches!(dangling, Err(CollaboratorsServiceError::InvalidManager)),
            "expected InvalidManager, got {dangling:?}"
        );
    }

    #[tokio::test]
    async fn collaborator_cannot_manage_themselves() {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let gil = create_collaborator(&ctx, company.uuid, "Gil", None).await;

        let result = ctx
            .collaborators
            .update_collaborator(
                company.uuid,
                gil.uuid,
                CollaboratorUpdate {
                    manager_uuid: Some(gil.uuid),
                    ..CollaboratorUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(CollaboratorsServiceError::SelfManagement)),
            "expected SelfManagement, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reporting_cycles_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let top = create_collaborator(&ctx, company.uuid, "Top", None).await;
        let middle = create_collaborator(&ctx, company.uuid, "Middle", Some(top.uuid)).await;
        let bottom = create_collaborator(&ctx, company.uuid, "Bottom", Some(middle.uuid)).await;

        for manager in [middle.uuid, bottom.uuid] {
            let result = ctx
                .collaborators
                .update_collaborator(
                    company.uuid,
                    top.uuid,
                    CollaboratorUpdate {
                        manager_uuid: Some(manager),
                        ..CollaboratorUpdate::default()
                    },
                )
                .await;

            assert!(
                matches!(result, Err(CollaboratorsServiceError::ManagerCycle)),
                "expected ManagerCycle, got {result:?}"
            );
        }

        let unchanged = ctx
            .collaborators
            .get_collaborator(company.uuid, top.uuid)
            .await?;

        assert_eq!(unchanged.manager_uuid, None);

        // Moving a subtree under a sibling branch is fine.
        let side = create_collaborator(&ctx, company.uuid, "Side", Some(top.uuid)).await;

        let moved = ctx
            .collaborators
            .update_collaborator(
                company.uuid,
                middle.uuid,
                CollaboratorUpdate {
                    manager_uuid: Some(side.uuid),
                    ..CollaboratorUpdate::default()
                },
            )
            .await?;

        assert_eq!(moved.manager_uuid, Some(side.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_omitted_identity_and_replaces_contact() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let boss = create_collaborator(&ctx, company.uuid, "Boss", None).await;

        let original = ctx
            .collaborators
            .create_collaborator(
                company.uuid,
                NewCollaborator {
                    name: "Helena".to_string(),
                    role: "Designer".to_string(),
                    email: Some("helena@acme.test".to_string()),
                    department: Some("Product".to_string()),
                    photo_path: Some(PathBuf::from("uploads/photos/helena.jpg")),
                    manager_uuid: Some(boss.uuid),
                    ..NewCollaborator::default()
                },
            )
            .await?;

        let updated = ctx
            .collaborators
            .update_collaborator(
                company.uuid,
                original.uuid,
                CollaboratorUpdate {
                    email: Some("h@acme.test".to_string()),
                    ..CollaboratorUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.name, "Helena");
        assert_eq!(updated.role, "Designer");
        assert_eq!(updated.photo_path, original.photo_path);
        assert_eq!(updated.email.as_deref(), Some("h@acme.test"));
        assert_eq!(updated.department, None);
        assert_eq!(updated.manager_uuid, None, "omitted manager makes a root");

        Ok(())
    }

    #[tokio::test]
    async fn deleting_manager_turns_reports_into_roots() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let boss = create_collaborator(&ctx, company.uuid, "Boss", None).await;
        let report = create_collaborator(&ctx, company.uuid, "Report", Some(boss.uuid)).await;

        ctx.collaborators
            .delete_collaborator(company.uuid, boss.uuid)
            .await?;

        let orphan = ctx
            .collaborators
            .get_collaborator(company.uuid, report.uuid)
            .await?;

        assert_eq!(orphan.manager_uuid, None);

        let again = ctx
            .collaborators
            .delete_collaborator(company.uuid, boss.uuid)
            .await;

        assert!(
            matches!(again, Err(CollaboratorsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn collaborators_are_scoped_to_their_company() {
        let ctx = TestContext::new().await;
        let acme = create_company(&ctx, "Acme").await;
        let globex = create_company(&ctx, "Globex").await;
        let ivo = create_collaborator(&ctx, acme.uuid, "Ivo", None).await;

        let get = ctx
            .collaborators
            .get_collaborator(globex.uuid, ivo.uuid)
            .await;
        let update = ctx
            .collaborators
            .update_collaborator(globex.uuid, ivo.uuid, CollaboratorUpdate::default())
            .await;
        let delete = ctx
            .collaborators
            .delete_collaborator(globex.uuid, ivo.uuid)
            .await;

        assert!(matches!(get, Err(CollaboratorsServiceError::NotFound)), "get: {get:?}");
        assert!(
            matches!(update, Err(CollaboratorsServiceError::NotFound)),
            "update: {update:?}"
        );
        assert!(
            matches!(delete, Err(CollaboratorsServiceError::NotFound)),
            "delete: {delete:?}"
        );
        assert!(
            ctx.collaborators
                .list_collaborators(globex.uuid)
                .await
                .is_ok_and(|list| list.is_empty())
        );
    }

    #[tokio::test]
    async fn list_collaborators_orders_by_name() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        create_collaborator(&ctx, company.uuid, "Zuleica", None).await;
        create_collaborator(&ctx, company.uuid, "Artur", None).await;
        create_collaborator(&ctx, company.uuid, "Marta", None).await;

        let names: Vec<String> = ctx
            .collaborators
            .list_collaborators(company.uuid)
            .await?
            .into_iter()
            .map(|collaborator| collaborator.name)
            .collect();

        assert_eq!(names, ["Artur", "Marta", "Zuleica"]);

        Ok(())
    }

    #[tokio::test]
    async fn deleting_company_removes_its_collaborators() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let boss = create_collaborator(&ctx, company.uuid, "Boss", None).await;
        create_collaborator(&ctx, company.uuid, "Report", Some(boss.uuid)).await;

        ctx.companies.delete_company(company.uuid).await?;

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collaborators")
            .fetch_one(ctx.db.pool())
            .await?;

        assert_eq!(remaining, 0);

        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_in_one_company_all_succeed() -> TestResult {
        let ctx = TestContext::new().await;
        let company = create_company(&ctx, "Acme").await;
        let lead = create_collaborator(&ctx, company.uuid, "Lead", None).await;

        let handles: Vec<_> = (0..12)
            .map(|n| {
                let collaborators = ctx.collaborators.clone();
                let company = company.uuid;
                let new = new_collaborator(&format!("Report {n}"), Some(lead.uuid));

                tokio::spawn(async move { collaborators.create_collaborator(company, new).await })
            })
            .collect();

        for handle in handles {
            let created = handle.await??;

            assert_eq!(created.manager_uuid, Some(lead.uuid));
        }

        let listed = ctx.collaborators.list_collaborators(company.uuid).await?;

        assert_eq!(listed.len(), 13);

        Ok(())
    }
}
