//! Create Team Handler

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

use worknest_app::domain::teams::data::NewTeam;

use crate::{
    extensions::*,
    state::State,
    teams::{errors::into_status_error, get::TeamResponse},
};

/// Create Team Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateTeamRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateTeamRequest> for NewTeam {
    fn from(request: CreateTeamRequest) -> Self {
        NewTeam {
            uuid: request.uuid.unwrap_or_else(Uuid::now_v7).into(),
            name: request.name,
            description: request.description,
        }
    }
}

/// Create Team Handler
#[endpoint(
    tags("teams"),
    summary = "Create Team",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Team created"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners and admins can create teams"),
        (status_code = StatusCode::BAD_REQUEST, description = "Team name is required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<CreateTeamRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TeamResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let team = state
        .app
        .teams
        .create_team(user, organization.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/teams/{}", team.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(team.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use worknest_app::domain::{
        organizations::records::OrganizationUuid,
        teams::{MockTeamsService, TeamsServiceError, records::TeamUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_team, service};

    use super::*;

    fn make_service(teams: MockTeamsService) -> Service {
        service(
            Mocks {
                teams,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/teams").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_team_success() -> TestResult {
        let organization = OrganizationUuid::new();
        let uuid = TeamUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_create_team()
            .once()
            .withf(move |user, org, new| {
                *user == TEST_USER_UUID
                    && *org == organization
                    && new.uuid == uuid
                    && new.name == "Design"
                    && new.description.as_deref() == Some("UI and UX")
            })
            .return_once(move |_, _, _| Ok(make_team(uuid)));

        let res = TestClient::post(format!(
            "http://example.com/organizations/{organization}/teams"
        ))
        .json(&json!({
            "uuid": uuid.into_uuid(),
            "name": "Design",
            "description": "UI and UX",
        }))
        .send(&make_service(teams))
        .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/teams/{uuid}").as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn test_member_cannot_create_team_returns_403() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut teams = MockTeamsService::new();

        teams
            .expect_create_team()
            .once()
            .return_once(|_, _, _| Err(TeamsServiceError::CreateForbidden));

        let mut res = TestClient::post(format!(
            "http://example.com/organizations/{organization}/teams"
        ))
        .json(&json!({ "name": "Design" }))
        .send(&make_service(teams))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(
            res.take_string()
                .await?
                .contains("Only owners and admins can create teams"),
            "expected the error brief in the body"
        );

        Ok(())
    }
}
