//! Team Task Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    tasks::{TasksResponse, errors::into_status_error},
};

/// Team Task Index Handler
///
/// Lists a team's tasks, newest first.
#[endpoint(
    tags("tasks"),
    summary = "List Team Tasks",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TasksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let tasks = state
        .app
        .tasks
        .list_team_tasks(user, team.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(tasks.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use worknest_app::domain::{
        tasks::{MockTasksService, TasksServiceError},
        teams::records::TeamUuid,
    };

    use crate::test_helpers::{Mocks, service};

    use super::*;

    #[tokio::test]
    async fn test_unknown_team_returns_404() -> TestResult {
        let team = TeamUuid::new();

        let mut tasks = MockTasksService::new();

        tasks
            .expect_list_team_tasks()
            .once()
            .withf(move |_, t| *t == team)
            .return_once(|_, _| Err(TasksServiceError::TeamNotFound));

        let res = TestClient::get(format!("http://example.com/teams/{team}/tasks"))
            .send(&service(
                Mocks {
                    tasks,
                    ..Mocks::default()
                },
                Router::with_path("teams/{team}/tasks").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
