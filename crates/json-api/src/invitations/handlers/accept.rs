//! Accept Invitation Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*, invitations::errors::into_status_error,
    organizations::members::update::MemberResponse, state::State,
};

/// Accept Invitation Handler
///
/// Joins the inviting organization with the invited role.
#[endpoint(
    tags("invitations"),
    summary = "Accept Invitation",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Invitation accepted"),
        (status_code = StatusCode::NOT_FOUND, description = "Invitation not found"),
        (status_code = StatusCode::CONFLICT, description = "Invitation has already been accepted"),
        (status_code = StatusCode::GONE, description = "Invitation has expired"),
    ),
)]
pub(crate) async fn handler(
    invitation: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let member = state
        .app
        .invitations
        .accept_invitation(user, invitation.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::{
        invitations::{InvitationsServiceError, MockInvitationsService, records::InvitationUuid},
        members::records::MemberRole,
        organizations::records::OrganizationUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_member, service};

    use super::*;

    fn make_service(invitations: MockInvitationsService) -> Service {
        service(
            Mocks {
                invitations,
                ..Mocks::default()
            },
            Router::with_path("invitations/{invitation}/accept").post(handler),
        )
    }

    #[tokio::test]
    async fn test_accept_returns_membership() -> TestResult {
        let invitation = InvitationUuid::new();
        let organization = OrganizationUuid::new();

        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_accept_invitation()
            .once()
            .withf(move |user, uuid| *user == TEST_USER_UUID && *uuid == invitation)
            .return_once(move |_, _| Ok(make_member(organization, MemberRole::Member)));

        let mut res = TestClient::post(format!(
            "http://example.com/invitations/{invitation}/accept"
        ))
        .send(&make_service(invitations))
        .await;

        let body: MemberResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.organization_uuid, organization.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_accept_expired_returns_410() -> TestResult {
        let invitation = InvitationUuid::new();

        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_accept_invitation()
            .once()
            .return_once(|_, _| Err(InvitationsServiceError::Expired));

        let res = TestClient::post(format!(
            "http://example.com/invitations/{invitation}/accept"
        ))
        .send(&make_service(invitations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::GONE));

        Ok(())
    }

    #[tokio::test]
    async fn test_accept_twice_returns_409() -> TestResult {
        let invitation = InvitationUuid::new();

        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_accept_invitation()
            .once()
            .return_once(|_, _| Err(InvitationsServiceError::AlreadyAccepted));

        let res = TestClient::post(format!(
            "http://example.com/invitations/{invitation}/accept"
        ))
        .send(&make_service(invitations))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
