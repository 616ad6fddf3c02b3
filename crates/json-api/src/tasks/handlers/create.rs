//! Create Task Handler

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

use worknest_app::domain::tasks::{data::NewTask, records::TaskPriority};

use crate::{
    extensions::*,
    state::State,
    tasks::{TaskResponse, errors::into_status_error},
};

/// Create Task Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTaskRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Put the task on a team board instead of the organization board
    #[serde(default)]
    pub team_uuid: Option<Uuid>,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to `medium`
    #[serde(default)]
    pub priority: Option<String>,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub assigned_to: Option<Uuid>,
}

impl TryFrom<CreateTaskRequest> for NewTask {
    type Error = StatusError;

    fn try_from(request: CreateTaskRequest) -> Result<Self, Self::Error> {
        let priority = request
            .priority
            .as_deref()
            .map(str::parse::<TaskPriority>)
            .transpose()
            .or_400("Invalid task priority")?
            .unwrap_or_default();

        let due_date = request
            .due_date
            .as_deref()
            .map(|value| parse_timestamp(value, "due_date"))
            .transpose()?;

        Ok(NewTask {
            uuid: request.uuid.unwrap_or_else(Uuid::now_v7).into(),
            team: request.team_uuid.map(Into::into),
            title: request.title,
            description: request.description,
            priority,
            due_date,
            assigned_to: request.assigned_to.map(Into::into),
        })
    }
}

/// Create Task Handler
#[endpoint(
    tags("tasks"),
    summary = "Create Task",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Task created"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<CreateTaskRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TaskResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let task = state
        .app
        .tasks
        .create_task(
            user,
            organization.into_inner().into(),
            json.into_inner().try_into()?,
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/tasks/{}", task.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(task.into()))
}
