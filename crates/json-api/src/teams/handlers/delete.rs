//! Delete Team Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, teams::errors::into_status_error};

/// Delete Team Handler
///
/// Also removes the team's memberships, tasks and events.
#[endpoint(
    tags("teams"),
    summary = "Delete Team",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Team deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners and admins can delete teams"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .teams
        .delete_team(user, team.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use worknest_app::domain::teams::{MockTeamsService, TeamsServiceError, records::TeamUuid};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::*;

    fn make_service(teams: MockTeamsService) -> Service {
        service(
            Mocks {
                teams,
                ..Mocks::default()
            },
            Router::with_path("teams/{team}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_team_success() -> TestResult {
        let uuid = TeamUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_delete_team()
            .once()
            .withf(move |user, team| *user == TEST_USER_UUID && *team == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/teams/{uuid}"))
            .send(&make_service(teams))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_team_forbidden_returns_403() -> TestResult {
        let uuid = TeamUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_delete_team()
            .once()
            .return_once(|_, _| Err(TeamsServiceError::DeleteForbidden));

        let res = TestClient::delete(format!("http://example.com/teams/{uuid}"))
            .send(&make_service(teams))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
