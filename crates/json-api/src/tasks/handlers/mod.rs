//! Task Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod mine;
pub(crate) mod team_index;
pub(crate) mod update;

use std::string::ToString;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::tasks::records::{TaskRecord, TaskSummaryRecord};

use crate::users::me::UserSummaryResponse;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaskResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,

    /// Absent for organization-level tasks
    pub team_uuid: Option<Uuid>,

    pub title: String,
    pub description: Option<String>,

    /// `todo`, `in_progress`, `review` or `completed`
    pub status: String,

    /// `low`, `medium`, `high` or `urgent`
    pub priority: String,

    pub due_date: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub created_by: Uuid,

    /// Set while the task is completed
    pub completed_at: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

impl From<TaskRecord> for TaskResponse {
    fn from(task: TaskRecord) -> Self {
        TaskResponse {
            uuid: task.uuid.into(),
            organization_uuid: task.organization_uuid.into(),
            team_uuid: task.team_uuid.map(Into::into),
            title: task.title,
            description: task.description,
            status: task.status.to_string(),
            priority: task.priority.to_string(),
            due_date: task.due_date.as_ref().map(ToString::to_string),
            assigned_to: task.assigned_to.map(Into::into),
            created_by: task.created_by.into(),
            completed_at: task.completed_at.as_ref().map(ToString::to_string),
            created_at: task.created_at.to_string(),
            updated_at: task.updated_at.to_string(),
        }
    }
}

/// A listed task with its assignee and creator.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaskSummaryResponse {
    pub task: TaskResponse,
    pub assignee: Option<UserSummaryResponse>,
    pub creator: UserSummaryResponse,
}

impl From<TaskSummaryRecord> for TaskSummaryResponse {
    fn from(summary: TaskSummaryRecord) -> Self {
        TaskSummaryResponse {
            task: summary.task.into(),
            assignee: summary.assignee.map(Into::into),
            creator: summary.creator.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TasksResponse {
    pub tasks: Vec<TaskSummaryResponse>,
}

impl From<Vec<TaskSummaryRecord>> for TasksResponse {
    fn from(tasks: Vec<TaskSummaryRecord>) -> Self {
        TasksResponse {
            tasks: tasks.into_iter().map(Into::into).collect(),
        }
    }
}
