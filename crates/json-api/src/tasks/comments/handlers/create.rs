//! Create Task Comment Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::tasks::records::TaskCommentRecord;

use crate::{
    extensions::*, state::State, tasks::errors::into_status_error,
    users::me::UserSummaryResponse,
};

/// Create Task Comment Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTaskCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TaskCommentResponse {
    pub uuid: Uuid,
    pub task_uuid: Uuid,
    pub author: UserSummaryResponse,
    pub content: String,
    pub created_at: String,
}

impl From<TaskCommentRecord> for TaskCommentResponse {
    fn from(comment: TaskCommentRecord) -> Self {
        TaskCommentResponse {
            uuid: comment.uuid.into(),
            task_uuid: comment.task_uuid.into(),
            author: comment.author.into(),
            content: comment.content,
            created_at: comment.created_at.to_string(),
        }
    }
}

/// Create Task Comment Handler
#[endpoint(
    tags("tasks"),
    summary = "Comment on Task",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Comment created"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Task not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Comment content is required"),
    ),
)]
pub(crate) async fn handler(
    task: PathParam<Uuid>,
    json: JsonBody<CreateTaskCommentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TaskCommentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let task = task.into_inner();

    let comment = state
        .app
        .tasks
        .add_task_comment(user, task.into(), json.into_inner().content)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/tasks/{task}/comments/{}", comment.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(comment.into()))
}
