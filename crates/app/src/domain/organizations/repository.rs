//! Organizations Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{decode_text, decode_timestamp},
    domain::{
        organizations::{
            data::NewOrganization,
            records::{OrganizationRecord, OrganizationUuid, UserOrganizationRecord},
        },
        users::records::UserUuid,
    },
};

const CREATE_ORGANIZATION_SQL: &str = include_str!("sql/create_organization.sql");
const GET_ORGANIZATION_SQL: &str = include_str!("sql/get_organization.sql");
const LIST_USER_ORGANIZATIONS_SQL: &str = include_str!("sql/list_user_organizations.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrganizationsRepository;

impl PgOrganizationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_organization(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: &NewOrganization,
    ) -> Result<OrganizationRecord, sqlx::Error> {
        query_as::<Postgres, OrganizationRecord>(CREATE_ORGANIZATION_SQL)
            .bind(organization.uuid.into_uuid())
            .bind(&organization.name)
            .bind(&organization.slug)
            .bind(organization.logo.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_organization(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<OrganizationRecord, sqlx::Error> {
        query_as::<Postgres, OrganizationRecord>(GET_ORGANIZATION_SQL)
            .bind(organization.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_organizations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<UserOrganizationRecord>, sqlx::Error> {
        query_as::<Postgres, UserOrganizationRecord>(LIST_USER_ORGANIZATIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrganizationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrganizationUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            logo: row.try_get("logo")?,
            metadata: row.try_get("metadata")?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserOrganizationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            organization: OrganizationRecord::from_row(row)?,
            role: decode_text(row, "role")?,
            joined_at: decode_timestamp(row, "joined_at")?,
        })
    }
}
