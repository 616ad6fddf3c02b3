//! Remove Team Member Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, teams::errors::into_status_error};

/// Remove Team Member Handler
#[endpoint(
    tags("teams"),
    summary = "Remove Team Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Team member removed"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners, admins and team leads can manage team members"),
        (status_code = StatusCode::NOT_FOUND, description = "Team member not found"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    user: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    state
        .app
        .teams
        .remove_member_from_team(caller, team.into_inner().into(), user.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use worknest_app::domain::{
        teams::{MockTeamsService, TeamsServiceError, records::TeamUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::*;

    fn make_service(teams: MockTeamsService) -> Service {
        service(
            Mocks {
                teams,
                ..Mocks::default()
            },
            Router::with_path("teams/{team}/members/{user}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_member_success() -> TestResult {
        let team = TeamUuid::new();
        let target = UserUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_remove_member_from_team()
            .once()
            .withf(move |user, t, u| *user == TEST_USER_UUID && *t == team && *u == target)
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/teams/{team}/members/{target}"))
            .send(&make_service(teams))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_plain_member_cannot_remove_returns_403() -> TestResult {
        let team = TeamUuid::new();
        let target = UserUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_remove_member_from_team()
            .once()
            .return_once(|_, _, _| Err(TeamsServiceError::ManageMembersForbidden));

        let res = TestClient::delete(format!("http://example.com/teams/{team}/members/{target}"))
            .send(&make_service(teams))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
