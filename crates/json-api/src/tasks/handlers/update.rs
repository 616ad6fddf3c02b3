//! Update Task Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use worknest_app::domain::tasks::{
    data::TaskUpdate,
    records::{TaskPriority, TaskStatus},
};

use crate::{
    extensions::*,
    state::State,
    tasks::{TaskResponse, errors::into_status_error},
};

/// Distinguish an explicit `null` from an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Update Task Request
///
/// Omitted fields are left untouched; `null` clears `due_date` and
/// `assigned_to`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub priority: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    #[salvo(schema(value_type = Option<String>))]
    pub due_date: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    #[salvo(schema(value_type = Option<Uuid>))]
    pub assigned_to: Option<Option<Uuid>>,
}

impl TryFrom<UpdateTaskRequest> for TaskUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateTaskRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()
            .or_400("Invalid task status")?;

        let priority = request
            .priority
            .as_deref()
            .map(str::parse::<TaskPriority>)
            .transpose()
            .or_400("Invalid task priority")?;

        let due_date = match request.due_date {
            Some(Some(value)) => Some(Some(parse_timestamp(&value, "due_date")?)),
            Some(None) => Some(None),
            None => None,
        };

        Ok(TaskUpdate {
            title: request.title,
            description: request.description,
            status,
            priority,
            due_date,
            assigned_to: request
                .assigned_to
                .map(|assignee| assignee.map(Into::into)),
        })
    }
}

/// Update Task Handler
///
/// Completing a task stamps `completed_at`; moving it out of `completed`
/// clears it.
#[endpoint(
    tags("tasks"),
    summary = "Update Task",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Task updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the creator, assignee or an admin can update this task"),
        (status_code = StatusCode::NOT_FOUND, description = "Task not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    task: PathParam<Uuid>,
    json: JsonBody<UpdateTaskRequest>,
    depot: &mut Depot,
) -> Result<Json<TaskResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let task = state
        .app
        .tasks
        .update_task(user, task.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(task.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use worknest_app::domain::tasks::{MockTasksService, TasksServiceError, records::TaskUuid};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_task, service};

    use super::*;

    fn make_service(tasks: MockTasksService) -> Service {
        service(
            Mocks {
                tasks,
                ..Mocks::default()
            },
            Router::with_path("tasks/{task}").put(handler),
        )
    }

    #[test]
    fn null_clears_and_absent_keeps() -> TestResult {
        let request: UpdateTaskRequest =
            serde_json::from_value(json!({ "due_date": null, "status": "review" }))?;
        let update = TaskUpdate::try_from(request)?;

        assert_eq!(update.due_date, Some(None));
        assert_eq!(update.assigned_to, None);
        assert_eq!(update.status, Some(TaskStatus::Review));

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_task() -> TestResult {
        let uuid = TaskUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_update_task()
            .once()
            .withf(move |user, task, update| {
                *user == TEST_USER_UUID
                    && *task == uuid
                    && update.status == Some(TaskStatus::Completed)
                    && update.assigned_to == Some(None)
            })
            .return_once(move |_, _, _| {
                let mut task = make_task(uuid);

                task.status = TaskStatus::Completed;
                task.completed_at = Some(Timestamp::UNIX_EPOCH);

                Ok(task)
            });

        let mut res = TestClient::put(format!("http://example.com/tasks/{uuid}"))
            .json(&json!({ "status": "completed", "assigned_to": null }))
            .send(&make_service(tasks))
            .await;

        let body: TaskResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "completed");
        assert!(body.completed_at.is_some(), "expected completed_at to be set");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let uuid = TaskUuid::new();

        let res = TestClient::put(format!("http://example.com/tasks/{uuid}"))
            .json(&json!({ "status": "done" }))
            .send(&make_service(MockTasksService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_by_outsider_to_task_returns_403() -> TestResult {
        let uuid = TaskUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_update_task()
            .once()
            .return_once(|_, _, _| Err(TasksServiceError::UpdateForbidden));

        let res = TestClient::put(format!("http://example.com/tasks/{uuid}"))
            .json(&json!({ "title": "Mine now" }))
            .send(&make_service(tasks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
