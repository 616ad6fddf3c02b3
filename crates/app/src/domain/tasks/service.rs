//! Tasks service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        members::{records::MemberRole, repository::PgMembersRepository},
        optional_text,
        organizations::records::OrganizationUuid,
        permissions::authorize,
        required_text,
        tasks::{
            data::{NewTask, TaskUpdate},
            errors::TasksServiceError,
            records::{
                TaskCommentRecord, TaskDetailsRecord, TaskRecord, TaskSummaryRecord, TaskUuid,
            },
            repository::PgTasksRepository,
        },
        teams::{records::TeamUuid, repository::PgTeamsRepository},
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgTasksService {
    db: Db,
    repository: PgTasksRepository,
    members: PgMembersRepository,
    teams: PgTeamsRepository,
}

impl PgTasksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTasksRepository::new(),
            members: PgMembersRepository::new(),
            teams: PgTeamsRepository::new(),
        }
    }

    async fn ensure_assignee_is_member(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        assignee: Option<UserUuid>,
    ) -> Result<(), TasksServiceError> {
        let Some(assignee) = assignee else {
            return Ok(());
        };

        if self
            .members
            .find_membership(tx, assignee, organization)
            .await?
            .is_none()
        {
            return Err(TasksServiceError::AssigneeNotMember);
        }

        Ok(())
    }
}

#[async_trait]
impl TasksService for PgTasksService {
    async fn create_task(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        task: NewTask,
    ) -> Result<TaskRecord, TasksServiceError> {
        let title = required_text(&task.title).ok_or(TasksServiceError::MissingTitle)?;

        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        if let Some(team) = task.team {
            let team = self
                .teams
                .get_team(&mut tx, team)
                .await
                .map_err(TasksServiceError::from_team_lookup)?;

            if team.organization_uuid != organization {
                return Err(TasksServiceError::TeamNotFound);
            }
        }

        self.ensure_assignee_is_member(&mut tx, organization, task.assigned_to)
            .await?;

        let created = self
            .repository
            .create_task(
                &mut tx,
                organization,
                &NewTask {
                    title,
                    description: optional_text(task.description),
                    ..task
                },
                user,
            )
            .await?;

        tx.commit().await?;

        info!(organization = %organization, task = %created.uuid, "task created");

        Ok(created)
    }

    async fn list_organization_tasks(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let tasks = self
            .repository
            .list_organization_tasks(&mut tx, organization)
            .await?;

        tx.commit().await?;

        Ok(tasks)
    }

    async fn list_team_tasks(
        &self,
        user: UserUuid,
        team: TeamUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError> {
        let mut tx = self.db.begin().await?;

        let team = self
            .teams
            .get_team(&mut tx, team)
            .await
            .map_err(TasksServiceError::from_team_lookup)?;

        authorize(
            self.members
                .find_membership(&mut tx, user, team.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let tasks = self.repository.list_team_tasks(&mut tx, team.uuid).await?;

        tx.commit().await?;

        Ok(tasks)
    }

    async fn list_my_tasks(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError> {
        let mut tx = self.db.begin().await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::ANY,
        )?;

        let tasks = self
            .repository
            .list_my_tasks(&mut tx, organization, user)
            .await?;

        tx.commit().await?;

        Ok(tasks)
    }

    async fn get_task(
        &self,
        user: UserUuid,
        task: TaskUuid,
    ) -> Result<TaskDetailsRecord, TasksServiceError> {
        let mut tx = self.db.begin().await?;

        let task = self.repository.get_task(&mut tx, task).await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, task.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let comments = self.repository.list_task_comments(&mut tx, task.uuid).await?;

        tx.commit().await?;

        Ok(TaskDetailsRecord { task, comments })
    }

    async fn update_task(
        &self,
        user: UserUuid,
        task: TaskUuid,
        update: TaskUpdate,
    ) -> Result<TaskRecord, TasksServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_task(&mut tx, task).await?;

        let member = authorize(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let involved = current.created_by == user || current.assigned_to == Some(user);

        if !involved && !member.role.is_privileged() {
            return Err(TasksServiceError::UpdateForbidden);
        }

        let title = match update.title {
            Some(title) => required_text(&title).ok_or(TasksServiceError::MissingTitle)?,
            None => current.title.clone(),
        };

        let assigned_to = update.assigned_to.unwrap_or(current.assigned_to);

        if assigned_to != current.assigned_to {
            self.ensure_assignee_is_member(&mut tx, current.organization_uuid, assigned_to)
                .await?;
        }

        let status = update.status.unwrap_or(current.status);

        let merged = TaskRecord {
            title,
            description: match update.description {
                Some(description) => optional_text(Some(description)),
                None => current.description.clone(),
            },
            status,
            priority: update.priority.unwrap_or(current.priority),
            due_date: update.due_date.unwrap_or(current.due_date),
            assigned_to,
            completed_at: status.completed_at(current.completed_at, Timestamp::now()),
            ..current
        };

        let updated = self.repository.update_task(&mut tx, &merged).await?;

        tx.commit().await?;

        info!(task = %task, status = %updated.status, "task updated");

        Ok(updated)
    }

    async fn delete_task(&self, user: UserUuid, task: TaskUuid) -> Result<(), TasksServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_task(&mut tx, task).await?;

        let member = authorize(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        if current.created_by != user && !member.role.is_privileged() {
            return Err(TasksServiceError::DeleteForbidden);
        }

        if self.repository.delete_task(&mut tx, task).await? == 0 {
            return Err(TasksServiceError::NotFound);
        }

        tx.commit().await?;

        info!(organization = %current.organization_uuid, task = %task, "task deleted");

        Ok(())
    }

    async fn add_task_comment(
        &self,
        user: UserUuid,
        task: TaskUuid,
        content: String,
    ) -> Result<TaskCommentRecord, TasksServiceError> {
        let content = required_text(&content).ok_or(TasksServiceError::MissingContent)?;

        let mut tx = self.db.begin().await?;

        let task = self.repository.get_task(&mut tx, task).await?;

        authorize(
            self.members
                .find_membership(&mut tx, user, task.organization_uuid)
                .await?,
            MemberRole::ANY,
        )?;

        let comment = self
            .repository
            .create_task_comment(&mut tx, task.uuid, user, &content)
            .await?;

        tx.commit().await?;

        Ok(comment)
    }
}

#[automock]
#[async_trait]
pub trait TasksService: Send + Sync {
    /// Creates a task at organization level or, with `team`, on a team board.
    async fn create_task(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        task: NewTask,
    ) -> Result<TaskRecord, TasksServiceError>;

    /// Organization-level tasks (no team), newest first.
    async fn list_organization_tasks(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError>;

    async fn list_team_tasks(
        &self,
        user: UserUuid,
        team: TeamUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError>;

    /// Tasks the caller created or is assigned to.
    async fn list_my_tasks(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<TaskSummaryRecord>, TasksServiceError>;

    async fn get_task(
        &self,
        user: UserUuid,
        task: TaskUuid,
    ) -> Result<TaskDetailsRecord, TasksServiceError>;

    /// Applies `update`, keeping `completed_at` in step with the status.
    async fn update_task(
        &self,
        user: UserUuid,
        task: TaskUuid,
        update: TaskUpdate,
    ) -> Result<TaskRecord, TasksServiceError>;

    async fn delete_task(&self, user: UserUuid, task: TaskUuid) -> Result<(), TasksServiceError>;

    async fn add_task_comment(
        &self,
        user: UserUuid,
        task: TaskUuid,
        content: String,
    ) -> Result<TaskCommentRecord, TasksServiceError>;
}
