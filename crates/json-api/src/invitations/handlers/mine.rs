//! User Invitations Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use worknest_app::domain::invitations::records::UserInvitationRecord;

use crate::{
    extensions::*,
    invitations::{errors::into_status_error, index::InvitationResponse},
    state::State,
};

/// An invitation addressed to the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserInvitationResponse {
    pub invitation: InvitationResponse,
    pub organization_name: String,
    pub organization_slug: String,
}

impl From<UserInvitationRecord> for UserInvitationResponse {
    fn from(record: UserInvitationRecord) -> Self {
        let mut invitation = InvitationResponse::at(record.invitation, Timestamp::now());

        invitation.state = record.state.to_string();

        UserInvitationResponse {
            invitation,
            organization_name: record.organization_name,
            organization_slug: record.organization_slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserInvitationsResponse {
    pub invitations: Vec<UserInvitationResponse>,
}

/// User Invitations Handler
///
/// With `pending=true`, only invitations the caller can still accept.
#[endpoint(
    tags("invitations"),
    summary = "List My Invitations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    pending: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<UserInvitationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let invitations = if pending.into_inner().unwrap_or(false) {
        state.app.invitations.check_pending_invitations(user).await
    } else {
        state.app.invitations.get_user_invitations(user).await
    }
    .map_err(into_status_error)?;

    Ok(Json(UserInvitationsResponse {
        invitations: invitations.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::{
        invitations::{
            MockInvitationsService,
            records::{InvitationState, InvitationUuid},
        },
        organizations::records::OrganizationUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_invitation, service};

    use super::*;

    fn make_service(invitations: MockInvitationsService) -> Service {
        service(
            Mocks {
                invitations,
                ..Mocks::default()
            },
            Router::with_path("invitations").get(handler),
        )
    }

    fn user_invitation(state: InvitationState) -> UserInvitationRecord {
        UserInvitationRecord {
            invitation: make_invitation(
                InvitationUuid::new(),
                OrganizationUuid::new(),
                "ann@example.com",
            ),
            organization_name: "Acme".to_string(),
            organization_slug: "acme".to_string(),
            state,
        }
    }

    #[tokio::test]
    async fn test_pending_flag_checks_pending_invitations() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations
            .expect_check_pending_invitations()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(vec![user_invitation(InvitationState::Pending)]));

        invitations.expect_get_user_invitations().never();

        let mut res = TestClient::get("http://example.com/invitations?pending=true")
            .send(&make_service(invitations))
            .await;

        let body: UserInvitationsResponse = res.take_json().await?;
        let invitation = body.invitations.first().ok_or("expected an invitation")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(invitation.organization_slug, "acme");
        assert_eq!(invitation.invitation.state, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_without_flag_lists_all_invitations() -> TestResult {
        let mut invitations = MockInvitationsService::new();

        invitations.expect_check_pending_invitations().never();

        invitations
            .expect_get_user_invitations()
            .once()
            .return_once(|_| Ok(vec![user_invitation(InvitationState::Accepted)]));

        let mut res = TestClient::get("http://example.com/invitations")
            .send(&make_service(invitations))
            .await;

        let body: UserInvitationsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body.invitations
                .first()
                .map(|invitation| invitation.invitation.state.as_str()),
            Some("accepted")
        );

        Ok(())
    }
}
