//! Add Team Member Handler

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

use worknest_app::domain::teams::records::TeamMemberRole;

use crate::{
    extensions::*,
    state::State,
    teams::{errors::into_status_error, members::TeamMemberResponse},
};

/// Add Team Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddTeamMemberRequest {
    pub user_uuid: Uuid,

    /// `lead` or `member`; defaults to `member`
    #[serde(default)]
    pub role: Option<String>,
}

/// Add Team Member Handler
#[endpoint(
    tags("teams"),
    summary = "Add Team Member",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Team member added"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners, admins and team leads can manage team members"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
        (status_code = StatusCode::CONFLICT, description = "User is already a team member"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    json: JsonBody<AddTeamMemberRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TeamMemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();
    let team = team.into_inner();

    let role = request
        .role
        .as_deref()
        .map(str::parse::<TeamMemberRole>)
        .transpose()
        .or_400("Invalid team role")?
        .unwrap_or_default();

    let member = state
        .app
        .teams
        .add_member_to_team(user, team.into(), request.user_uuid.into(), role)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/teams/{team}/members/{}", member.user_uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(member.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use worknest_app::domain::{
        teams::{MockTeamsService, TeamsServiceError, records::TeamUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::{super::tests::*, *};

    fn make_service(teams: MockTeamsService) -> Service {
        service(
            Mocks {
                teams,
                ..Mocks::default()
            },
            Router::with_path("teams/{team}/members").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_member_defaults_to_member_role() -> TestResult {
        let team = TeamUuid::new();
        let target = UserUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_add_member_to_team()
            .once()
            .withf(move |user, t, u, role| {
                *user == TEST_USER_UUID
                    && *t == team
                    && *u == target
                    && *role == TeamMemberRole::Member
            })
            .return_once(move |_, _, _, role| Ok(make_team_member(team, target, role)));

        let mut res = TestClient::post(format!("http://example.com/teams/{team}/members"))
            .json(&json!({ "user_uuid": target.into_uuid() }))
            .send(&make_service(teams))
            .await;

        let body: TeamMemberResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/teams/{team}/members/{target}").as_str()));
        assert_eq!(body.role, "member");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_existing_member_returns_409() -> TestResult {
        let team = TeamUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_add_member_to_team()
            .once()
            .return_once(|_, _, _, _| Err(TeamsServiceError::AlreadyTeamMember));

        let res = TestClient::post(format!("http://example.com/teams/{team}/members"))
            .json(&json!({ "user_uuid": UserUuid::new().into_uuid(), "role": "lead" }))
            .send(&make_service(teams))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_member_unknown_role_returns_400() -> TestResult {
        let team = TeamUuid::new();

        let res = TestClient::post(format!("http://example.com/teams/{team}/members"))
            .json(&json!({ "user_uuid": UserUuid::new().into_uuid(), "role": "owner" }))
            .send(&make_service(MockTeamsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
