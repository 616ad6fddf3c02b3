//! Invitations service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        invitations::{
            data::{INVITATION_TTL, NewInvitations, recipient_emails},
            errors::InvitationsServiceError,
            records::{InvitationRecord, InvitationStatus, InvitationUuid, UserInvitationRecord},
            repository::PgInvitationsRepository,
        },
        members::{
            records::{MemberRecord, MemberRole},
            repository::PgMembersRepository,
        },
        organizations::records::OrganizationUuid,
        permissions::{PermissionDenied, authorize},
        users::{records::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgInvitationsService {
    db: Db,
    repository: PgInvitationsRepository,
    members: PgMembersRepository,
    users: PgUsersRepository,
}

impl PgInvitationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgInvitationsRepository::new(),
            members: PgMembersRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl InvitationsService for PgInvitationsService {
    async fn invite_members(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        invitations: NewInvitations,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
        )
        .map_err(|denied| match denied {
            PermissionDenied::RoleRequired(_) => InvitationsServiceError::InviteForbidden,
            PermissionDenied::NotMember => denied.into(),
        })?;

        if invitations.role == MemberRole::Owner {
            return Err(InvitationsServiceError::OwnerRoleNotInvitable);
        }

        let recipients =
            recipient_emails(&invitations.emails).map_err(InvitationsServiceError::InvalidEmail)?;

        if recipients.is_empty() {
            return Err(InvitationsServiceError::NoRecipients);
        }

        let expires_at = Timestamp::now() + INVITATION_TTL;
        let mut created = Vec::with_capacity(recipients.len());

        for email in recipients {
            if self
                .repository
                .email_is_member(&mut tx, organization, &email)
                .await?
            {
                warn!(organization = %organization, email, "skipping invitation for existing member");

                continue;
            }

            let invitation = self
                .repository
                .create_invitation(
                    &mut tx,
                    organization,
                    &email,
                    invitations.role,
                    user,
                    expires_at,
                )
                .await?;

            // Delivery is handled outside this service; the record is the source of truth.
            info!(
                organization = %organization,
                invitation = %invitation.uuid,
                email = %invitation.email,
                expires_at = %invitation.expires_at,
                "invitation issued"
            );

            created.push(invitation);
        }

        tx.commit().await?;

        Ok(created)
    }

    async fn list_organization_invitations(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
        )?;

        let invitations = self
            .repository
            .list_organization_invitations(&mut tx, organization)
            .await?;

        tx.commit().await?;

        Ok(invitations)
    }

    async fn check_pending_invitations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserInvitationRecord>, InvitationsServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let email = self.users.get_user(&mut tx, user).await?.email;

        let invitations = self
            .repository
            .list_pending_invitations_for_email(&mut tx, &email, now)
            .await?;

        tx.commit().await?;

        Ok(invitations
            .into_iter()
            .map(|invitation| invitation.observed_at(now))
            .collect())
    }

    async fn get_user_invitations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserInvitationRecord>, InvitationsServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let email = self.users.get_user(&mut tx, user).await?.email;

        let invitations = self
            .repository
            .list_invitations_for_email(&mut tx, &email)
            .await?;

        tx.commit().await?;

        Ok(invitations
            .into_iter()
            .map(|invitation| invitation.observed_at(now))
            .collect())
    }

    async fn accept_invitation(
        &self,
        user: UserUuid,
        invitation: InvitationUuid,
    ) -> Result<MemberRecord, InvitationsServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let email = self.users.get_user(&mut tx, user).await?.email;
        let invitation = self.repository.lock_invitation(&mut tx, invitation).await?;

        if invitation.email != email {
            return Err(InvitationsServiceError::NotFound);
        }

        if invitation.status == InvitationStatus::Accepted {
            return Err(InvitationsServiceError::AlreadyAccepted);
        }

        if invitation.is_expired_at(now) {
            return Err(InvitationsServiceError::Expired);
        }

        if self
            .members
            .find_membership(&mut tx, user, invitation.organization_uuid)
            .await?
            .is_some()
        {
            return Err(InvitationsServiceError::AlreadyMember);
        }

        // A concurrent accept for the same (organization, user) fails here on
        // the unique constraint and surfaces as `AlreadyMember`.
        let member = self
            .members
            .create_member(&mut tx, invitation.organization_uuid, user, invitation.role)
            .await?;

        if self
            .repository
            .mark_invitation_accepted(&mut tx, invitation.uuid, now)
            .await?
            == 0
        {
            return Err(InvitationsServiceError::AlreadyAccepted);
        }

        tx.commit().await?;

        info!(
            organization = %invitation.organization_uuid,
            invitation = %invitation.uuid,
            user = %user,
            "invitation accepted"
        );

        Ok(member)
    }
}

#[automock]
#[async_trait]
pub trait InvitationsService: Send + Sync {
    /// Issues pending invitations expiring after [`INVITATION_TTL`].
    ///
    /// Addresses that already belong to members are skipped.
    async fn invite_members(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        invitations: NewInvitations,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError>;

    /// Lists every invitation of an organization, newest first.
    async fn list_organization_invitations(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<InvitationRecord>, InvitationsServiceError>;

    /// Pending, unexpired invitations addressed to the caller.
    async fn check_pending_invitations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserInvitationRecord>, InvitationsServiceError>;

    /// All invitations addressed to the caller, newest first.
    async fn get_user_invitations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserInvitationRecord>, InvitationsServiceError>;

    /// Converts a pending invitation into a membership.
    async fn accept_invitation(
        &self,
        user: UserUuid,
        invitation: InvitationUuid,
    ) -> Result<MemberRecord, InvitationsServiceError>;
}
