//! Organizations service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        members::{
            records::{MemberDetailsRecord, MemberRecord, MemberRole, MemberUuid},
            repository::PgMembersRepository,
        },
        optional_text,
        organizations::{
            data::{NewOrganization, is_valid_slug},
            errors::OrganizationsServiceError,
            records::{OrganizationRecord, OrganizationUuid, UserOrganizationRecord},
            repository::PgOrganizationsRepository,
        },
        permissions::{PermissionDenied, authorize},
        required_text,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrganizationsService {
    db: Db,
    repository: PgOrganizationsRepository,
    members: PgMembersRepository,
}

impl PgOrganizationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrganizationsRepository::new(),
            members: PgMembersRepository::new(),
        }
    }
}

#[async_trait]
impl OrganizationsService for PgOrganizationsService {
    async fn create_organization(
        &self,
        user: UserUuid,
        organization: NewOrganization,
    ) -> Result<OrganizationRecord, OrganizationsServiceError> {
        let (Some(name), Some(slug)) = (
            required_text(&organization.name),
            required_text(&organization.slug),
        ) else {
            return Err(OrganizationsServiceError::MissingRequiredData);
        };

        if !is_valid_slug(&slug) {
            return Err(OrganizationsServiceError::InvalidSlug);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_organization(
                &mut tx,
                &NewOrganization {
                    uuid: organization.uuid,
                    name,
                    slug,
                    logo: optional_text(organization.logo),
                },
            )
            .await?;

        self.members
            .create_member(&mut tx, created.uuid, user, MemberRole::Owner)
            .await?;

        tx.commit().await?;

        info!(organization = %created.uuid, owner = %user, "organization created");

        Ok(created)
    }

    async fn get_user_organization(
        &self,
        user: UserUuid,
    ) -> Result<Option<OrganizationRecord>, OrganizationsServiceError> {
        let organizations = self.list_user_organizations(user).await?;

        Ok(organizations
            .into_iter()
            .next()
            .map(|membership| membership.organization))
    }

    async fn list_user_organizations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserOrganizationRecord>, OrganizationsServiceError> {
        let mut tx = self.db.begin().await?;

        let organizations = self.repository.list_user_organizations(&mut tx, user).await?;

        tx.commit().await?;

        Ok(organizations)
    }

    async fn get_organization(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<OrganizationRecord, OrganizationsServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let organization = self.repository.get_organization(&mut tx, organization).await?;

        tx.commit().await?;

        Ok(organization)
    }

    async fn list_organization_members(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<MemberDetailsRecord>, OrganizationsServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let members = self.members.list_members(&mut tx, organization).await?;

        tx.commit().await?;

        Ok(members)
    }

    async fn update_member_role(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        member: MemberUuid,
        role: MemberRole,
    ) -> Result<MemberRecord, OrganizationsServiceError> {
        let mut tx = self.db.begin().await?;

        let caller = authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
        )
        .map_err(|denied| match denied {
            PermissionDenied::RoleRequired(_) => OrganizationsServiceError::RoleUpdateForbidden,
            PermissionDenied::NotMember => denied.into(),
        })?;

        self.members.lock_organization(&mut tx, organization).await?;

        let target = self
            .members
            .get_member(&mut tx, organization, member)
            .await
            .map_err(OrganizationsServiceError::from_member_lookup)?;

        let touches_owner = target.role == MemberRole::Owner || role == MemberRole::Owner;

        if touches_owner && caller.role != MemberRole::Owner {
            return Err(OrganizationsServiceError::OwnerRoleForbidden);
        }

        if target.role == MemberRole::Owner
            && role != MemberRole::Owner
            && self.members.count_owners(&mut tx, organization).await? <= 1
        {
            return Err(OrganizationsServiceError::LastOwner);
        }

        let updated = self
            .members
            .update_member_role(&mut tx, organization, member, role)
            .await
            .map_err(OrganizationsServiceError::from_member_lookup)?;

        tx.commit().await?;

        info!(
            organization = %organization,
            member = %member,
            role = %role,
            "member role updated"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrganizationsService: Send + Sync {
    /// Creates an organization and makes the caller its owner.
    async fn create_organization(
        &self,
        user: UserUuid,
        organization: NewOrganization,
    ) -> Result<OrganizationRecord, OrganizationsServiceError>;

    /// The first organization the caller joined, if any.
    async fn get_user_organization(
        &self,
        user: UserUuid,
    ) -> Result<Option<OrganizationRecord>, OrganizationsServiceError>;

    /// Every organization the caller belongs to, with the caller's role.
    async fn list_user_organizations(
        &self,
        user: UserUuid,
    ) -> Result<Vec<UserOrganizationRecord>, OrganizationsServiceError>;

    /// Retrieve an organization the caller belongs to.
    async fn get_organization(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<OrganizationRecord, OrganizationsServiceError>;

    /// Lists members of an organization the caller belongs to.
    async fn list_organization_members(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<MemberDetailsRecord>, OrganizationsServiceError>;

    /// Changes a member's role. Owners and admins only.
    async fn update_member_role(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        member: MemberUuid,
        role: MemberRole,
    ) -> Result<MemberRecord, OrganizationsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_organization(name: &str, slug: &str) -> NewOrganization {
        NewOrganization {
            uuid: OrganizationUuid::new(),
            name: name.to_string(),
            slug: slug.to_string(),
            logo: None,
        }
    }

    #[tokio::test]
    async fn create_organization_makes_creator_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Owner", "owner@example.com").await;

        let organization = ctx
            .organizations
            .create_organization(user, new_organization(" Acme ", "acme"))
            .await?;

        let members = ctx
            .organizations
            .list_organization_members(user, organization.uuid)
            .await?;

        assert_eq!(organization.name, "Acme");
        assert_eq!(members.len(), 1);
        assert!(
            members
                .first()
                .is_some_and(|m| m.user.uuid == user && m.role == MemberRole::Owner),
            "creator should be the sole owner"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_organization_requires_name_and_slug() {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Owner", "owner@example.com").await;

        let result = ctx
            .organizations
            .create_organization(user, new_organization("Acme", "  "))
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_organization_duplicate_slug_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Owner", "owner@example.com").await;

        ctx.organizations
            .create_organization(user, new_organization("Acme", "acme"))
            .await?;

        let result = ctx
            .organizations
            .create_organization(user, new_organization("Acme Two", "acme"))
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::SlugTaken)),
            "expected SlugTaken, got {result:?}"
        );

        let organizations = ctx.organizations.list_user_organizations(user).await?;

        assert_eq!(organizations.len(), 1, "failed create must not leave rows");

        Ok(())
    }

    #[tokio::test]
    async fn get_user_organization_returns_first_joined() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Owner", "owner@example.com").await;

        assert!(
            ctx.organizations.get_user_organization(user).await?.is_none(),
            "new users have no organization"
        );

        let first = ctx.create_organization(user, "first").await;

        ctx.create_organization(user, "second").await;

        let current = ctx.organizations.get_user_organization(user).await?;

        assert_eq!(current.map(|o| o.uuid), Some(first));

        Ok(())
    }

    #[tokio::test]
    async fn get_organization_rejects_non_members() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let outsider = ctx.create_user("Outsider", "outsider@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;

        let result = ctx
            .organizations
            .get_organization(outsider, organization)
            .await;

        assert!(
            matches!(
                result,
                Err(OrganizationsServiceError::Permission(
                    PermissionDenied::NotMember
                ))
            ),
            "expected NotMember, got {result:?}"
        );
    }

    #[tokio::test]
    async fn member_cannot_update_roles() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let member = ctx.create_user("Member", "member@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let membership = ctx
            .add_member(organization, member, MemberRole::Member)
            .await;

        let result = ctx
            .organizations
            .update_member_role(member, organization, membership, MemberRole::Admin)
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::RoleUpdateForbidden)),
            "expected RoleUpdateForbidden, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn owner_can_promote_member_to_admin() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let member = ctx.create_user("Member", "member@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let membership = ctx
            .add_member(organization, member, MemberRole::Member)
            .await;

        let updated = ctx
            .organizations
            .update_member_role(owner, organization, membership, MemberRole::Admin)
            .await?;

        assert_eq!(updated.role, MemberRole::Admin);

        Ok(())
    }

    #[tokio::test]
    async fn admin_cannot_grant_owner_role() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let admin = ctx.create_user("Admin", "admin@example.com").await;
        let member = ctx.create_user("Member", "member@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;

        ctx.add_member(organization, admin, MemberRole::Admin).await;

        let membership = ctx
            .add_member(organization, member, MemberRole::Member)
            .await;

        let result = ctx
            .organizations
            .update_member_role(admin, organization, membership, MemberRole::Owner)
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::OwnerRoleForbidden)),
            "expected OwnerRoleForbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sole_owner_cannot_be_demoted() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;

        let members = ctx
            .organizations
            .list_organization_members(owner, organization)
            .await?;

        let owner_membership = members.first().map(|m| m.uuid).ok_or("missing owner")?;

        let result = ctx
            .organizations
            .update_member_role(owner, organization, owner_membership, MemberRole::Member)
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::LastOwner)),
            "expected LastOwner, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_demotions_of_two_owners_keep_one_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx.create_user("First", "first@example.com").await;
        let second = ctx.create_user("Second", "second@example.com").await;
        let organization = ctx.create_organization(first, "acme").await;
        let second_membership = ctx.add_member(organization, second, MemberRole::Owner).await;

        let first_membership = ctx
            .organizations
            .list_organization_members(first, organization)
            .await?
            .into_iter()
            .find(|m| m.user.uuid == first)
            .map(|m| m.uuid)
            .ok_or("missing first owner")?;

        let (demote_second, demote_first) = tokio::join!(
            ctx.organizations.update_member_role(
                first,
                organization,
                second_membership,
                MemberRole::Member
            ),
            ctx.organizations.update_member_role(
                second,
                organization,
                first_membership,
                MemberRole::Member
            ),
        );

        assert_eq!(
            usize::from(demote_second.is_ok()) + usize::from(demote_first.is_ok()),
            1,
            "exactly one demotion should win: {demote_second:?} / {demote_first:?}"
        );

        let owners = ctx
            .organizations
            .list_organization_members(first, organization)
            .await?
            .into_iter()
            .filter(|m| m.role == MemberRole::Owner)
            .count();

        assert_eq!(owners, 1);

        Ok(())
    }

    #[tokio::test]
    async fn update_role_of_member_in_other_organization_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let other_owner = ctx.create_user("Other", "other@example.com").await;
        let member = ctx.create_user("Member", "member@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let other = ctx.create_organization(other_owner, "globex").await;
        let foreign_membership = ctx.add_member(other, member, MemberRole::Member).await;

        let result = ctx
            .organizations
            .update_member_role(owner, organization, foreign_membership, MemberRole::Admin)
            .await;

        assert!(
            matches!(result, Err(OrganizationsServiceError::MemberNotFound)),
            "expected MemberNotFound, got {result:?}"
        );

        Ok(())
    }
}
