//! Invitations Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{decode_optional_timestamp, decode_text, decode_timestamp},
    domain::{
        invitations::records::{InvitationRecord, InvitationUuid, UserInvitationRecord},
        members::records::MemberRole,
        organizations::records::OrganizationUuid,
        users::records::UserUuid,
    },
};

const CREATE_INVITATION_SQL: &str = include_str!("sql/create_invitation.sql");
const LOCK_INVITATION_SQL: &str = include_str!("sql/lock_invitation.sql");
const MARK_INVITATION_ACCEPTED_SQL: &str = include_str!("sql/mark_invitation_accepted.sql");
const LIST_ORGANIZATION_INVITATIONS_SQL: &str =
    include_str!("sql/list_organization_invitations.sql");
const LIST_INVITATIONS_FOR_EMAIL_SQL: &str = include_str!("sql/list_invitations_for_email.sql");
const LIST_PENDING_INVITATIONS_FOR_EMAIL_SQL: &str =
    include_str!("sql/list_pending_invitations_for_email.sql");
const EMAIL_IS_MEMBER_SQL: &str = include_str!("sql/email_is_member.sql");

/// Invitation joined with its organization, before the state is derived.
#[derive(Debug)]
pub(crate) struct InvitationWithOrganization {
    invitation: InvitationRecord,
    organization_name: String,
    organization_slug: String,
}

impl InvitationWithOrganization {
    pub(crate) fn observed_at(self, now: Timestamp) -> UserInvitationRecord {
        UserInvitationRecord {
            state: self.invitation.state_at(now),
            invitation: self.invitation,
            organization_name: self.organization_name,
            organization_slug: self.organization_slug,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInvitationsRepository;

impl PgInvitationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_invitation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        email: &str,
        role: MemberRole,
        inviter: UserUuid,
        expires_at: Timestamp,
    ) -> Result<InvitationRecord, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(CREATE_INVITATION_SQL)
            .bind(InvitationUuid::new().into_uuid())
            .bind(organization.into_uuid())
            .bind(email)
            .bind(role.as_str())
            .bind(inviter.into_uuid())
            .bind(SqlxTimestamp::from(expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch an invitation and hold a row lock until the transaction ends.
    pub(crate) async fn lock_invitation(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invitation: InvitationUuid,
    ) -> Result<InvitationRecord, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(LOCK_INVITATION_SQL)
            .bind(invitation.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_invitation_accepted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invitation: InvitationUuid,
        accepted_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(MARK_INVITATION_ACCEPTED_SQL)
            .bind(invitation.into_uuid())
            .bind(SqlxTimestamp::from(accepted_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_organization_invitations(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<Vec<InvitationRecord>, sqlx::Error> {
        query_as::<Postgres, InvitationRecord>(LIST_ORGANIZATION_INVITATIONS_SQL)
            .bind(organization.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_invitations_for_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Vec<InvitationWithOrganization>, sqlx::Error> {
        query_as::<Postgres, InvitationWithOrganization>(LIST_INVITATIONS_FOR_EMAIL_SQL)
            .bind(email)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_pending_invitations_for_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        now: Timestamp,
    ) -> Result<Vec<InvitationWithOrganization>, sqlx::Error> {
        query_as::<Postgres, InvitationWithOrganization>(LIST_PENDING_INVITATIONS_FOR_EMAIL_SQL)
            .bind(email)
            .bind(SqlxTimestamp::from(now))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn email_is_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(EMAIL_IS_MEMBER_SQL)
            .bind(organization.into_uuid())
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for InvitationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: InvitationUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            email: row.try_get("email")?,
            role: decode_text(row, "role")?,
            status: decode_text(row, "status")?,
            inviter_uuid: UserUuid::from_uuid(row.try_get("inviter_uuid")?),
            expires_at: decode_timestamp(row, "expires_at")?,
            created_at: decode_timestamp(row, "created_at")?,
            accepted_at: decode_optional_timestamp(row, "accepted_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for InvitationWithOrganization {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            invitation: InvitationRecord::from_row(row)?,
            organization_name: row.try_get("organization_name")?,
            organization_slug: row.try_get("organization_slug")?,
        })
    }
}
