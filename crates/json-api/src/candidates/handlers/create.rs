//! Invite Candidate Handler

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

use worknest_app::domain::recruitment::data::NewCandidate;

use crate::{
    candidates::{CandidateResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Invite Candidate Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InviteCandidateRequest {
    pub email: String,

    #[serde(default)]
    pub position: Option<String>,
}

impl From<InviteCandidateRequest> for NewCandidate {
    fn from(request: InviteCandidateRequest) -> Self {
        NewCandidate {
            email: request.email,
            position: request.position,
        }
    }
}

/// Invite Candidate Handler
#[endpoint(
    tags("candidates"),
    summary = "Invite Candidate",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Candidate invited"),
        (status_code = StatusCode::FORBIDDEN, description = "Requires owner or admin"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<InviteCandidateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CandidateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let candidate = state
        .app
        .recruitment
        .invite_candidate(
            user,
            organization.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/candidates/{}", candidate.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(candidate.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use worknest_app::domain::{
        organizations::records::OrganizationUuid,
        recruitment::{MockRecruitmentService, RecruitmentServiceError, records::CandidateUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_candidate, service};

    use super::*;

    fn make_service(recruitment: MockRecruitmentService) -> Service {
        service(
            Mocks {
                recruitment,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/candidates").post(handler),
        )
    }

    #[tokio::test]
    async fn test_invite_candidate_returns_token() -> TestResult {
        let organization = OrganizationUuid::new();
        let uuid = CandidateUuid::new();
        let candidate = make_candidate(uuid);
        let token = candidate.token;

        let mut recruitment = MockRecruitmentService::new();

        recruitment
            .expect_invite_candidate()
            .once()
            .withf(move |user, org, new| {
                *user == TEST_USER_UUID
                    && *org == organization
                    && new.email == "cand@example.com"
                    && new.position.as_deref() == Some("Engineer")
            })
            .return_once(move |_, _, _| Ok(candidate));

        let mut res = TestClient::post(format!(
            "http://example.com/organizations/{organization}/candidates"
        ))
        .json(&json!({ "email": "cand@example.com", "position": "Engineer" }))
        .send(&make_service(recruitment))
        .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let body: CandidateResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/candidates/{uuid}")));
        assert_eq!(body.token, token.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_invite_invalid_email_returns_400() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut recruitment = MockRecruitmentService::new();

        recruitment
            .expect_invite_candidate()
            .once()
            .return_once(|_, _, _| Err(RecruitmentServiceError::InvalidEmail));

        let res = TestClient::post(format!(
            "http://example.com/organizations/{organization}/candidates"
        ))
        .json(&json!({ "email": "nope" }))
        .send(&make_service(recruitment))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_invite_by_plain_member_returns_403() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut recruitment = MockRecruitmentService::new();

        recruitment
            .expect_invite_candidate()
            .once()
            .return_once(|_, _, _| Err(RecruitmentServiceError::ManageForbidden));

        let res = TestClient::post(format!(
            "http://example.com/organizations/{organization}/candidates"
        ))
        .json(&json!({ "email": "cand@example.com" }))
        .send(&make_service(recruitment))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
