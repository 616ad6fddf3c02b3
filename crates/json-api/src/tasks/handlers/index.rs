//! Organization Task Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    tasks::{TasksResponse, errors::into_status_error},
};

/// Organization Task Index Handler
///
/// Lists organization-level tasks, newest first.
#[endpoint(
    tags("tasks"),
    summary = "List Organization Tasks",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TasksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let tasks = state
        .app
        .tasks
        .list_organization_tasks(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(tasks.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::{
        organizations::records::OrganizationUuid,
        tasks::{MockTasksService, records::TaskUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_task_summary, service};

    use super::*;

    #[tokio::test]
    async fn test_index_lists_organization_tasks() -> TestResult {
        let organization = OrganizationUuid::new();
        let uuid = TaskUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_list_organization_tasks()
            .once()
            .withf(move |user, org| *user == TEST_USER_UUID && *org == organization)
            .return_once(move |_, _| Ok(vec![make_task_summary(uuid)]));

        let mut res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/tasks"
        ))
        .send(&service(
            Mocks {
                tasks,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/tasks").get(handler),
        ))
        .await;

        let body: TasksResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.tasks.first().map(|listed| listed.task.uuid),
            Some(uuid.into_uuid())
        );
        assert_eq!(
            body.tasks.first().map(|listed| listed.creator.uuid),
            Some(TEST_USER_UUID.into_uuid())
        );

        Ok(())
    }
}
