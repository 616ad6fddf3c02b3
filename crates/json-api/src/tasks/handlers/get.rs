//! Get Task Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::tasks::records::TaskDetailsRecord;

use crate::{
    extensions::*,
    state::State,
    tasks::{TaskResponse, comments::create::TaskCommentResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaskDetailsResponse {
    pub task: TaskResponse,

    /// Comments, oldest first
    pub comments: Vec<TaskCommentResponse>,
}

impl From<TaskDetailsRecord> for TaskDetailsResponse {
    fn from(details: TaskDetailsRecord) -> Self {
        TaskDetailsResponse {
            task: details.task.into(),
            comments: details.comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Task Handler
#[endpoint(
    tags("tasks"),
    summary = "Get Task",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Task with comments"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Task not found"),
    ),
)]
pub(crate) async fn handler(
    task: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TaskDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let task = state
        .app
        .tasks
        .get_task(user, task.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(task.into()))
}
