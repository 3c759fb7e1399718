//! Companies Repository

use std::path::{Path, PathBuf};

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{path_column, timestamp_column},
    domain::companies::{
        records::{CompanyRecord, CompanyUuid},
        slugs,
        theme::Theme,
    },
};

const LIST_COMPANIES_SQL: &str = include_str!("sql/list_companies.sql");
const GET_COMPANY_SQL: &str = include_str!("sql/get_company.sql");
const GET_COMPANY_BY_SLUG_SQL: &str = include_str!("sql/get_company_by_slug.sql");
const FIND_SLUG_HOLDER_SQL: &str = include_str!("sql/find_slug_holder.sql");
const CREATE_COMPANY_SQL: &str = include_str!("sql/create_company.sql");
const UPDATE_COMPANY_SQL: &str = include_str!("sql/update_company.sql");
const DELETE_COMPANY_SQL: &str = include_str!("sql/delete_company.sql");

/// Column values written on insert and update.
#[derive(Debug)]
pub(crate) struct CompanyRow<'a> {
    pub(crate) name: &'a str,
    pub(crate) tax_id: Option<&'a str>,
    pub(crate) logo_path: Option<&'a Path>,
    pub(crate) description: Option<&'a str>,
    pub(crate) theme: &'a Theme,
    pub(crate) slug: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCompaniesRepository;

impl SqliteCompaniesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_companies(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CompanyRecord>, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(LIST_COMPANIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_company(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(GET_COMPANY_SQL)
            .bind(company.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_company_by_slug(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        slug: &str,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(GET_COMPANY_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Try `base`, `base-1`, ... and return the first candidate that is free
    /// or already held by `current`.
    pub(crate) async fn allocate_slug(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        base: &str,
        current: Option<CompanyUuid>,
    ) -> Result<String, sqlx::Error> {
        let mut suffix = 0_u64;

        loop {
            let candidate = slugs::candidate(base, suffix);

            let holder = query_scalar::<Sqlite, Uuid>(FIND_SLUG_HOLDER_SQL)
                .bind(candidate.as_str())
                .fetch_optional(&mut **tx)
                .await?;

            match holder.map(CompanyUuid::from_uuid) {
                Some(holder) if Some(holder) != current => {
                    debug!(%candidate, %holder, "slug taken");
                    suffix += 1;
                }
                _ => return Ok(candidate),
            }
        }
    }

    pub(crate) async fn create_company(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        row: CompanyRow<'_>,
        now: Timestamp,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(CREATE_COMPANY_SQL)
            .bind(company.into_uuid())
            .bind(row.name)
            .bind(row.tax_id)
            .bind(row.logo_path.map(path_column))
            .bind(row.description)
            .bind(row.theme.kind())
            .bind(row.theme.value())
            .bind(row.slug)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_company(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
        row: CompanyRow<'_>,
        now: Timestamp,
    ) -> Result<CompanyRecord, sqlx::Error> {
        query_as::<Sqlite, CompanyRecord>(UPDATE_COMPANY_SQL)
            .bind(company.into_uuid())
            .bind(row.name)
            .bind(row.tax_id)
            .bind(row.logo_path.map(path_column))
            .bind(row.description)
            .bind(row.theme.kind())
            .bind(row.theme.value())
            .bind(row.slug)
            .bind(now.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_company(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        company: CompanyUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COMPANY_SQL)
            .bind(company.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CompanyRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let theme_type: String = row.try_get("theme_type")?;

        let theme = Theme::from_parts(&theme_type, row.try_get("theme_value")?).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "theme_type".to_string(),
                source: Box::new(e),
            }
        })?;

        Ok(Self {
            uuid: CompanyUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            tax_id: row.try_get("tax_id")?,
            logo_path: row
                .try_get::<Option<String>, _>("logo_path")?
                .map(PathBuf::from),
            description: row.try_get("description")?,
            theme,
            slug: row.try_get("slug")?,
            created_at: timestamp_column(row, "created_at")?,
            updated_at: timestamp_column(row, "updated_at")?,
        })
    }
}
