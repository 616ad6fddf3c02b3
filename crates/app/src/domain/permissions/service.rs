//! Permissions service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        members::{records::MemberRecord, repository::PgMembersRepository},
        organizations::records::OrganizationUuid,
        permissions::{AllowedRoles, PermissionsServiceError, authorize},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgPermissionsService {
    db: Db,
    members: PgMembersRepository,
}

impl PgPermissionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            members: PgMembersRepository::new(),
        }
    }
}

#[async_trait]
impl PermissionsService for PgPermissionsService {
    async fn get_current_user_membership(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Option<MemberRecord>, PermissionsServiceError> {
        let mut tx = self.db.begin().await?;

        let membership = self
            .members
            .find_membership(&mut tx, user, organization)
            .await?;

        tx.commit().await?;

        Ok(membership)
    }

    async fn check_user_permission(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        allowed: AllowedRoles,
    ) -> Result<MemberRecord, PermissionsServiceError> {
        let membership = self
            .get_current_user_membership(user, organization)
            .await?;

        Ok(authorize(membership, &allowed)?)
    }
}

#[automock]
#[async_trait]
pub trait PermissionsService: Send + Sync {
    /// Returns the caller's membership of the organization, if any.
    async fn get_current_user_membership(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Option<MemberRecord>, PermissionsServiceError>;

    /// Checks that the caller is a member holding one of the `allowed` roles.
    async fn check_user_permission(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        allowed: AllowedRoles,
    ) -> Result<MemberRecord, PermissionsServiceError>;
}
