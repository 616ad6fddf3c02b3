//! Candidate Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    candidates::{CandidatesResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Candidate Index Handler
#[endpoint(
    tags("candidates"),
    summary = "List Candidates",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Candidates, most recently invited first"),
        (status_code = StatusCode::FORBIDDEN, description = "Requires owner or admin"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CandidatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let candidates = state
        .app
        .recruitment
        .list_organization_candidates(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(candidates.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::{
        organizations::records::OrganizationUuid,
        permissions::PermissionDenied,
        recruitment::{MockRecruitmentService, records::CandidateUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_candidate, service};

    use super::*;

    fn make_service(recruitment: MockRecruitmentService) -> Service {
        service(
            Mocks {
                recruitment,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/candidates").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_candidates() -> TestResult {
        let organization = OrganizationUuid::new();
        let uuid = CandidateUuid::new();

        let mut recruitment = MockRecruitmentService::new();

        recruitment
            .expect_list_organization_candidates()
            .once()
            .withf(move |user, org| *user == TEST_USER_UUID && *org == organization)
            .return_once(move |_, _| Ok(vec![make_candidate(uuid)]));

        let mut res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/candidates"
        ))
        .send(&make_service(recruitment))
        .await;

        let body: CandidatesResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.candidates.first().map(|candidate| candidate.status.as_str()),
            Some("invited")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_plain_member_returns_403() -> TestResult {
        let organization = OrganizationUuid::new();

        let mut recruitment = MockRecruitmentService::new();

        recruitment
            .expect_list_organization_candidates()
            .once()
            .return_once(|_, _| Err(PermissionDenied::NotMember.into()));

        let res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/candidates"
        ))
        .send(&make_service(recruitment))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
