//! My Tasks Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    tasks::{TasksResponse, errors::into_status_error},
};

/// My Tasks Handler
///
/// Tasks the caller created or is assigned to, across teams.
#[endpoint(
    tags("tasks"),
    summary = "List My Tasks",
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
        .list_my_tasks(user, organization.into_inner().into())
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
        permissions::PermissionDenied,
        tasks::{MockTasksService, TasksServiceError, records::TaskUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{
        Mocks, TEST_USER_UUID, make_task_summary, make_user_summary, service,
    };

    use super::*;

    fn make_service(tasks: MockTasksService) -> Service {
        service(
            Mocks {
                tasks,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/tasks/mine").get(handler),
        )
    }

    #[tokio::test]
    async fn test_mine_returns_200() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_list_my_tasks()
            .once()
            .withf(move |user, org| *user == TEST_USER_UUID && *org == organization)
            .return_once(|_, _| Ok(Vec::new()));

        let res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/tasks/mine"
        ))
        .send(&make_service(tasks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_mine_embeds_the_assignee() -> TestResult {
        let organization = OrganizationUuid::new();
        let assignee = UserUuid::new();

        let mut tasks = MockTasksService::new();

        tasks.expect_list_my_tasks().once().return_once(move |_, _| {
            let mut summary = make_task_summary(TaskUuid::new());
            summary.task.assigned_to = Some(assignee);
            summary.assignee = Some(make_user_summary(assignee));

            Ok(vec![summary])
        });

        let mut res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/tasks/mine"
        ))
        .send(&make_service(tasks))
        .await;

        let body: TasksResponse = res.take_json().await?;
        let listed = body.tasks.first().ok_or("missing task")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            listed.assignee.as_ref().map(|user| user.uuid),
            Some(assignee.into_uuid())
        );
        assert_eq!(
            listed.assignee.as_ref().map(|user| user.name.as_str()),
            Some("Ann")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_mine_for_outsider_returns_403() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_list_my_tasks()
            .once()
            .return_once(|_, _| Err(TasksServiceError::Permission(PermissionDenied::NotMember)));

        let res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/tasks/mine"
        ))
        .send(&make_service(tasks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
