//! Delete Task Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, tasks::errors::into_status_error};

/// Delete Task Handler
#[endpoint(
    tags("tasks"),
    summary = "Delete Task",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Task deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the creator or an admin can delete this task"),
        (status_code = StatusCode::NOT_FOUND, description = "Task not found"),
    ),
)]
pub(crate) async fn handler(
    task: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .tasks
        .delete_task(user, task.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
