//! Tasks Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{decode_optional_timestamp, decode_text, decode_timestamp},
    domain::{
        organizations::records::OrganizationUuid,
        tasks::{
            data::NewTask,
            records::{
                TaskCommentRecord, TaskCommentUuid, TaskRecord, TaskSummaryRecord, TaskUuid,
            },
        },
        teams::records::TeamUuid,
        users::records::{UserSummary, UserUuid},
    },
};

const CREATE_TASK_SQL: &str = include_str!("sql/create_task.sql");
const GET_TASK_SQL: &str = include_str!("sql/get_task.sql");
const LOCK_TASK_SQL: &str = include_str!("sql/lock_task.sql");
const LIST_ORGANIZATION_TASKS_SQL: &str = include_str!("sql/list_organization_tasks.sql");
const LIST_TEAM_TASKS_SQL: &str = include_str!("sql/list_team_tasks.sql");
const LIST_MY_TASKS_SQL: &str = include_str!("sql/list_my_tasks.sql");
const UPDATE_TASK_SQL: &str = include_str!("sql/update_task.sql");
const DELETE_TASK_SQL: &str = include_str!("sql/delete_task.sql");
const LIST_TASK_COMMENTS_SQL: &str = include_str!("sql/list_task_comments.sql");
const CREATE_TASK_COMMENT_SQL: &str = include_str!("sql/create_task_comment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTasksRepository;

impl PgTasksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_task(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        task: &NewTask,
        created_by: UserUuid,
    ) -> Result<TaskRecord, sqlx::Error> {
        query_as::<Postgres, TaskRecord>(CREATE_TASK_SQL)
            .bind(task.uuid.into_uuid())
            .bind(organization.into_uuid())
            .bind(task.team.map(TeamUuid::into_uuid))
            .bind(&task.title)
            .bind(task.description.as_deref())
            .bind(task.priority.as_str())
            .bind(task.due_date.map(SqlxTimestamp::from))
            .bind(task.assigned_to.map(UserUuid::into_uuid))
            .bind(created_by.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_task(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: TaskUuid,
    ) -> Result<TaskRecord, sqlx::Error> {
        query_as::<Postgres, TaskRecord>(GET_TASK_SQL)
            .bind(task.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a task and hold a row lock until the transaction ends.
    pub(crate) async fn lock_task(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: TaskUuid,
    ) -> Result<TaskRecord, sqlx::Error> {
        query_as::<Postgres, TaskRecord>(LOCK_TASK_SQL)
            .bind(task.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_organization_tasks(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<Vec<TaskSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, TaskSummaryRecord>(LIST_ORGANIZATION_TASKS_SQL)
            .bind(organization.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_team_tasks(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        team: TeamUuid,
    ) -> Result<Vec<TaskSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, TaskSummaryRecord>(LIST_TEAM_TASKS_SQL)
            .bind(team.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_my_tasks(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
        user: UserUuid,
    ) -> Result<Vec<TaskSummaryRecord>, sqlx::Error> {
        query_as::<Postgres, TaskSummaryRecord>(LIST_MY_TASKS_SQL)
            .bind(organization.into_uuid())
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Persist every mutable column of `task`.
    pub(crate) async fn update_task(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: &TaskRecord,
    ) -> Result<TaskRecord, sqlx::Error> {
        query_as::<Postgres, TaskRecord>(UPDATE_TASK_SQL)
            .bind(task.uuid.into_uuid())
            .bind(&task.title)
            .bind(task.description.as_deref())
            .bind(task.status.as_str())
            .bind(task.priority.as_str())
            .bind(task.due_date.map(SqlxTimestamp::from))
            .bind(task.assigned_to.map(UserUuid::into_uuid))
            .bind(task.completed_at.map(SqlxTimestamp::from))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_task(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: TaskUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_TASK_SQL)
            .bind(task.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_task_comments(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: TaskUuid,
    ) -> Result<Vec<TaskCommentRecord>, sqlx::Error> {
        query_as::<Postgres, TaskCommentRecord>(LIST_TASK_COMMENTS_SQL)
            .bind(task.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_task_comment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        task: TaskUuid,
        author: UserUuid,
        content: &str,
    ) -> Result<TaskCommentRecord, sqlx::Error> {
        query_as::<Postgres, TaskCommentRecord>(CREATE_TASK_COMMENT_SQL)
            .bind(TaskCommentUuid::new().into_uuid())
            .bind(task.into_uuid())
            .bind(author.into_uuid())
            .bind(content)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TaskRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TaskUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            team_uuid: row
                .try_get::<Option<Uuid>, _>("team_uuid")?
                .map(TeamUuid::from_uuid),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: decode_text(row, "status")?,
            priority: decode_text(row, "priority")?,
            due_date: decode_optional_timestamp(row, "due_date")?,
            assigned_to: row
                .try_get::<Option<Uuid>, _>("assigned_to")?
                .map(UserUuid::from_uuid),
            created_by: UserUuid::from_uuid(row.try_get("created_by")?),
            completed_at: decode_optional_timestamp(row, "completed_at")?,
            created_at: decode_timestamp(row, "created_at")?,
            updated_at: decode_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TaskSummaryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            task: TaskRecord::from_row(row)?,
            assignee: UserSummary::from_optional_prefixed_row(row, "assignee")?,
            creator: UserSummary::from_prefixed_row(row, "creator")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TaskCommentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TaskCommentUuid::from_uuid(row.try_get("uuid")?),
            task_uuid: TaskUuid::from_uuid(row.try_get("task_uuid")?),
            author: UserSummary::from_prefixed_row(row, "author")?,
            content: row.try_get("content")?,
            created_at: decode_timestamp(row, "created_at")?,
        })
    }
}
