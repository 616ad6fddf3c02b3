//! Teams service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        members::{records::MemberRole, repository::PgMembersRepository},
        optional_text,
        organizations::records::OrganizationUuid,
        permissions::{authorize, authorize_or},
        required_text,
        teams::{
            data::{NewTeam, TeamUpdate},
            errors::TeamsServiceError,
            records::{
                TeamDetailsRecord, TeamMemberRecord, TeamMemberRole, TeamRecord,
                TeamSummaryRecord, TeamUuid,
            },
            repository::PgTeamsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgTeamsService {
    db: Db,
    repository: PgTeamsRepository,
    members: PgMembersRepository,
}

impl PgTeamsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTeamsRepository::new(),
            members: PgMembersRepository::new(),
        }
    }

    /// Organization owners and admins manage any team; leads manage their own.
    async fn authorize_team_manager(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        team: &TeamRecord,
    ) -> Result<(), TeamsServiceError> {
        let member = authorize(
            self.members
                .find_membership(tx, user, team.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        if member.role.is_privileged() {
            return Ok(());
        }

        match self.repository.find_team_member(tx, team.uuid, user).await? {
            Some(team_member) if team_member.role == TeamMemberRole::Lead => Ok(()),
            _ => Err(TeamsServiceError::ManageMembersForbidden),
        }
    }
}

#[async_trait]
impl TeamsService for PgTeamsService {
    async fn create_team(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        team: NewTeam,
    ) -> Result<TeamRecord, TeamsServiceError> {
        let name = required_text(&team.name).ok_or(TeamsServiceError::MissingRequiredData)?;
        let description = optional_text(team.description);

        let mut tx = self.db.begin().await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
            TeamsServiceError::CreateForbidden,
        )?;

        let created = self
            .repository
            .create_team(
                &mut tx,
                team.uuid,
                organization,
                &name,
                description.as_deref(),
                user,
            )
            .await?;

        tx.commit().await?;

        info!(organization = %organization, team = %created.uuid, "team created");

        Ok(created)
    }

    async fn list_organization_teams(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TeamSummaryRecord>, TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let teams = self
            .repository
            .list_organization_teams(&mut tx, organization)
            .await?;

        tx.commit().await?;

        Ok(teams)
    }

    async fn get_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
    ) -> Result<TeamDetailsRecord, TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self.repository.get_team(&mut tx, team).await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, team.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let members = self.repository.list_team_members(&mut tx, team.uuid).await?;

        tx.commit().await?;

        Ok(TeamDetailsRecord { team, members })
    }

    async fn update_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        update: TeamUpdate,
    ) -> Result<TeamRecord, TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_team(&mut tx, team).await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::PRIVILEGED,
            TeamsServiceError::UpdateForbidden,
        )?;

        let name = match update.name {
            Some(name) => required_text(&name).ok_or(TeamsServiceError::MissingRequiredData)?,
            None => current.name,
        };

        let description = match update.description {
            Some(description) => optional_text(Some(description)),
            None => current.description,
        };

        let updated = self
            .repository
            .update_team(&mut tx, team, &name, description.as_deref())
            .await?;

        tx.commit().await?;

        info!(team = %team, "team updated");

        Ok(updated)
    }

    async fn delete_team(&self, user: UserUuid, team: TeamUuid) -> Result<(), TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_team(&mut tx, team).await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::PRIVILEGED,
            TeamsServiceError::DeleteForbidden,
        )?;

        if self.repository.delete_team(&mut tx, team).await? == 0 {
            return Err(TeamsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(organization = %current.organization_uuid, team = %team, "team deleted");

        Ok(())
    }

    async fn add_member_to_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self.repository.get_team(&mut tx, team).await?;

        self.authorize_team_manager(&mut tx, user, &team).await?;

        if self
            .members
            .find_membership(&mut tx, target, team.organization_uuid)
            .await?
            .is_none()
        {
            return Err(TeamsServiceError::NotOrganizationMember);
        }

        let created = self
            .repository
            .create_team_member(&mut tx, team.uuid, target, role)
            .await?;

        tx.commit().await?;

        info!(team = %team.uuid, user = %target, role = %role, "team member added");

        Ok(created)
    }

    async fn remove_member_from_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
    ) -> Result<(), TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self.repository.get_team(&mut tx, team).await?;

        self.authorize_team_manager(&mut tx, user, &team).await?;

        if self
            .repository
            .delete_team_member(&mut tx, team.uuid, target)
            .await?
            == 0
        {
            return Err(TeamsServiceError::MemberNotFound);
        }

        tx.commit().await?;

        info!(team = %team.uuid, user = %target, "team member removed");

        Ok(())
    }

    async fn update_team_member_role(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, TeamsServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self.repository.get_team(&mut tx, team).await?;

        self.authorize_team_manager(&mut tx, user, &team).await?;

        let updated = self
            .repository
            .update_team_member_role(&mut tx, team.uuid, target, role)
            .await
            .map_err(TeamsServiceError::from_member_lookup)?;

        tx.commit().await?;

        info!(team = %team.uuid, user = %target, role = %role, "team member role updated");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait TeamsService: Send + Sync {
    /// Creates a team inside an organization. Owners and admins only.
    async fn create_team(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        team: NewTeam,
    ) -> Result<TeamRecord, TeamsServiceError>;

    /// Lists an organization's teams, newest first, with member counts.
    async fn list_organization_teams(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TeamSummaryRecord>, TeamsServiceError>;

    async fn get_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
    ) -> Result<TeamDetailsRecord, TeamsServiceError>;

    async fn update_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        update: TeamUpdate,
    ) -> Result<TeamRecord, TeamsServiceError>;

    /// Deletes a team along with its memberships, tasks and events.
    async fn delete_team(&self, user: UserUuid, team: TeamUuid) -> Result<(), TeamsServiceError>;

    /// Adds an organization member to a team.
    async fn add_member_to_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, TeamsServiceError>;

    async fn remove_member_from_team(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
    ) -> Result<(), TeamsServiceError>;

    async fn update_team_member_role(
        &self,
        user: UserUuid,
        team: TeamUuid,
        target: UserUuid,
        role: TeamMemberRole,
    ) -> Result<TeamMemberRecord, TeamsServiceError>;
}
