//! Members Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{decode_text, decode_timestamp},
    domain::{
        members::records::{MemberDetailsRecord, MemberRecord, MemberRole, MemberUuid},
        organizations::records::OrganizationUuid,
        users::records::{UserSummary, UserUuid},
    },
};

const FIND_MEMBERSHIP_SQL: &str = include_str!("sql/find_membership.sql");
const CREATE_MEMBER_SQL: &str = include_str!("sql/create_member.sql");
const LIST_MEMBERS_SQL: &str = include_str!("sql/list_members.sql");
const GET_MEMBER_SQL: &str = include_str!("sql/get_member.sql");
const UPDATE_MEMBER_ROLE_SQL: &str = include_str!("sql/update_member_role.sql");
const COUNT_OWNERS_SQL: &str = include_str!("sql/count_owners.sql");
const LOCK_ORGANIZATION_SQL: &str = include_str!("sql/lock_organization.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMembersRepository;

impl PgMembersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_membership(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Option<MemberRecord>, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(FIND_MEMBERSHIP_SQL)
            .bind(organization.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        user: UserUuid,
        role: MemberRole,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(CREATE_MEMBER_SQL)
            .bind(MemberUuid::new().into_uuid())
            .bind(organization.into_uuid())
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_members(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<Vec<MemberDetailsRecord>, sqlx::Error> {
        query_as::<Postgres, MemberDetailsRecord>(LIST_MEMBERS_SQL)
            .bind(organization.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch and lock a member row of the given organization.
    pub(crate) async fn get_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        member: MemberUuid,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(GET_MEMBER_SQL)
            .bind(organization.into_uuid())
            .bind(member.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_member_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        member: MemberUuid,
        role: MemberRole,
    ) -> Result<MemberRecord, sqlx::Error> {
        query_as::<Postgres, MemberRecord>(UPDATE_MEMBER_ROLE_SQL)
            .bind(organization.into_uuid())
            .bind(member.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Serialize role changes within an organization until the transaction ends.
    pub(crate) async fn lock_organization(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_ORGANIZATION_SQL)
            .bind(organization.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn count_owners(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_OWNERS_SQL)
            .bind(organization.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for MemberRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MemberUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            role: decode_text(row, "role")?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for MemberDetailsRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MemberUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            user: UserSummary::from_prefixed_row(row, "user")?,
            role: decode_text(row, "role")?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}
