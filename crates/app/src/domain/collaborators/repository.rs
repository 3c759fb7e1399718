//! Collaborators Repository

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    database::{path_column, timestamp_column},
    domain::{
        collaborators::records::{CollaboratorRecord, CollaboratorUuid},
        companies::records::CompanyUuid,
    },
};

const LIST_COLLABORATORS_SQL: &str = include_str!("sql/list_collaborators.sql");
const GET_COLLABORATOR_SQL: &str = include_str!("sql/get_collaborator.sql");
const COMPANY_EXISTS_SQL: &str = include_str!("sql/company_exists.sql");
const CHAIN_CONTAINS_SQL: &str = include_str!("sql/chain_contains.sql");
const CREATE_COLLABORATOR_SQL: &str = include_str!("sql/create_collaborator.sql");
const UPDATE_COLLABORATOR_SQL: &str = include_str!("sql/update_collaborator.sql");
const DELETE_COLLABORATOR_SQL: &str = include_str!("sql/delete_collaborator.sql");

/// Column values written on insert and update.
#[derive(Debug)]
pub(crate) struct CollaboratorRow<'a> {
    pub(crate) name: &'a str,
    pub(crate) role: &'a str,
    pub(crate) email: Option<&'a str>,
    pub(crate) department: Option<&'a str>,
    pub(crate) phone: Option<&'a str>,
    pub(crate) photo_path: Option<&'a Path>,
    pub(crate) manager_uuid: Option<CollaboratorUuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCollaboratorsRepository;

impl SqliteCollaboratorsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn company_exists(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Sqlite, bool>(COMPANY_EXISTS_SQL)
            .bind(company.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_collaborators(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
    ) -> Result<Vec<CollaboratorRecord>, sqlx::Error> {
        query_as::<Sqlite, CollaboratorRecord>(LIST_COLLABORATORS_SQL)
            .bind(company.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_collaborator(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<CollaboratorRecord, sqlx::Error> {
        query_as::<Sqlite, CollaboratorRecord>(GET_COLLABORATOR_SQL)
            .bind(company.into_uuid())
            .bind(collaborator.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Whether `target` sits on the management chain that starts at `start`
    /// (inclusive).
    pub(crate) async fn chain_contains(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        start: CollaboratorUuid,
        target: CollaboratorUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Sqlite, bool>(CHAIN_CONTAINS_SQL)
            .bind(start.into_uuid())
            .bind(target.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_collaborator(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
        row: CollaboratorRow<'_>,
        now: Timestamp,
    ) -> Result<CollaboratorRecord, sqlx::Error> {
        query_as::<Sqlite, CollaboratorRecord>(CREATE_COLLABORATOR_SQL)
            .bind(collaborator.into_uuid())
            .bind(company.into_uuid())
            .bind(row.name)
            .bind(row.role)
            .bind(row.email)
            .bind(row.department)
            .bind(row.phone)
            .bind(row.photo_path.map(path_column))
            .bind(row.manager_uuid.map(CollaboratorUuid::into_uuid))
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_collaborator(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
        row: CollaboratorRow<'_>,
        now: Timestamp,
    ) -> Result<CollaboratorRecord, sqlx::Error> {
        query_as::<Sqlite, CollaboratorRecord>(UPDATE_COLLABORATOR_SQL)
            .bind(company.into_uuid())
            .bind(collaborator.into_uuid())
            .bind(row.name)
            .bind(row.role)
            .bind(row.email)
            .bind(row.department)
            .bind(row.phone)
            .bind(row.photo_path.map(path_column))
            .bind(row.manager_uuid.map(CollaboratorUuid::into_uuid))
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_collaborator(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        collaborator: CollaboratorUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COLLABORATOR_SQL)
            .bind(company.into_uuid())
            .bind(collaborator.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CollaboratorRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CollaboratorUuid::from_uuid(row.try_get("uuid")?),
            company_uuid: CompanyUuid::from_uuid(row.try_get("company_uuid")?),
            name: row.try_get("name")?,
            role: row.try_get("role")?,
            email: row.try_get("email")?,
            department: row.try_get("department")?,
            phone: row.try_get("phone")?,
            photo_path: row
                .try_get::<Option<String>, _>("photo_path")?
                .map(PathBuf::from),
            manager_uuid: row
                .try_get::<Option<Uuid>, _>("manager_uuid")?
                .map(CollaboratorUuid::from_uuid),
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}
