//! Teams Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::{decode_text, decode_timestamp},
    domain::{
        organizations::records::OrganizationUuid,
        teams::records::{
            TeamMemberDetailsRecord, TeamMemberRecord, TeamMemberRole, TeamMemberUuid, TeamRecord,
            TeamSummaryRecord, TeamUuid,
        },
        users::records::{UserSummary, UserUuid},
    },
};

const CREATE_TEAM_SQL: &str = include_str!("sql/create_team.sql");
const GET_TEAM_SQL: &str = include_str!("sql/get_team.sql");
const LOCK_TEAM_SQL: &str = include_str!("sql/lock_team.sql");
const LIST_ORGANIZATION_TEAMS_SQL: &str = include_str!("sql/list_organization_teams.sql");
const UPDATE_TEAM_SQL: &str = include_str!("sql/update_team.sql");
const DELETE_TEAM_SQL: &str = include_str!("sql/delete_team.sql");
const LIST_TEAM_MEMBERS_SQL: &str = include_str!("sql/list_team_members.sql");
const FIND_TEAM_MEMBER_SQL: &str = include_str!("sql/find_team_member.sql");
const CREATE_TEAM_MEMBER_SQL: &str = include_str!("sql/create_team_member.sql");
const DELETE_TEAM_MEMBER_SQL: &str = include_str!("sql/delete_team_member.sql");
const UPDATE_TEAM_MEMBER_ROLE_SQL: &str = include_str!("sql/update_team_member_role.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTeamsRepository;

impl PgTeamsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_team(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: TeamUuid,
        organization: OrganizationUuid,
        name: &str,
        description: Option<&str>,
        created_by: UserUuid,
    ) -> Result<TeamRecord, sqlx::Error> {
        query_as::<Postgres, TeamRecord>(CREATE_TEAM_SQL)
            .bind(uuid.into_uuid())
            .bind(organization.into_uuid())
            .bind(name)
            .bind(description)
            .bind(created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_team(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
    ) -> Result<TeamRecord, sqlx::Error> {
        query_as::<Postgres, TeamRecord>(GET_TEAM_SQL)
            .bind(team.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a team and hold a row lock until the transaction ends.
    pub(crate) async fn lock_team(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
    ) -> Result<TeamRecord, sqlx::Error> {
        query_as::<Postgres, TeamRecord>(LOCK_TEAM_SQL)
            .bind(team.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_organization_teams(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<Vec<TeamSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, TeamSummaryRecord>(LIST_ORGANIZATION_TEAMS_SQL)
            .bind(organization.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_team(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<TeamRecord, sqlx::Error> {
        query_as::<Postgres, TeamRecord>(UPDATE_TEAM_SQL)
            .bind(team.into_uuid())
            .bind(name)
            .bind(description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_team(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TEAM_SQL)
            .bind(team.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_team_members(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
    ) -> Result<Vec<TeamMemberDetailsRecord>, sqlx::Error> {
        query_as::<Postgres, TeamMemberDetailsRecord>(LIST_TEAM_MEMBERS_SQL)
            .bind(team.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_team_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        user: UserUuid,
    ) -> Result<Option<TeamMemberRecord>, sqlx::Error> {
        query_as::<Postgres, TeamMemberRecord>(FIND_TEAM_MEMBER_SQL)
            .bind(team.into_uuid())
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_team_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        user: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, sqlx::Error> {
        query_as::<Postgres, TeamMemberRecord>(CREATE_TEAM_MEMBER_SQL)
            .bind(TeamMemberUuid::new().into_uuid())
            .bind(team.into_uuid())
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_team_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TEAM_MEMBER_SQL)
            .bind(team.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_team_member_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
        user: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, sqlx::Error> {
        query_as::<Postgres, TeamMemberRecord>(UPDATE_TEAM_MEMBER_ROLE_SQL)
            .bind(team.into_uuid())
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TeamRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TeamUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            created_at: decode_timestamp(row, "created_at")?,
            updated_at: decode_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TeamSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            team: TeamRecord::from_row(row)?,
            member_count: row.try_get("member_count")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TeamMemberRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TeamMemberUuid::from_uuid(row.try_get("uuid")?),
            team_uuid: TeamUuid::from_uuid(row.try_get("team_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            role: decode_text(row, "role")?,
            joined_at: decode_timestamp(row, "joined_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TeamMemberDetailsRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TeamMemberUuid::from_uuid(row.try_get("uuid")?),
            team_uuid: TeamUuid::from_uuid(row.try_get("team_uuid")?),
            user: UserSummary::from_prefixed_row(row, "user")?,
            role: decode_text(row, "role")?,
            joined_at: decode_timestamp(row, "joined_at")?,
        })
    }
}
