//! Create Invitations Handler

use std::sync::Arc;

use jiff::Timestamp;
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

use worknest_app::domain::{invitations::data::NewInvitations, members::records::MemberRole};

use crate::{
    extensions::*,
    invitations::{errors::into_status_error, index::InvitationsResponse},
    state::State,
};

/// Create Invitations Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateInvitationsRequest {
    pub emails: Vec<String>,

    /// `admin` or `member`; defaults to `member`
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<CreateInvitationsRequest> for NewInvitations {
    type Error = StatusError;

    fn try_from(request: CreateInvitationsRequest) -> Result<Self, Self::Error> {
        let role = request
            .role
            .as_deref()
            .map(str::parse::<MemberRole>)
            .transpose()
            .or_400("Invalid role")?
            .unwrap_or(MemberRole::Member);

        Ok(NewInvitations {
            emails: request.emails,
            role,
        })
    }
}

/// Create Invitations Handler
///
/// Invites each address to join the organization. Existing members are skipped.
#[endpoint(
    tags("invitations"),
    summary = "Invite Members",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Invitations created"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners and admins can invite members"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<CreateInvitationsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<InvitationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let organization = organization.into_inner();

    let invitations = state
        .app
        .invitations
        .invite_members(user, organization.into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/organizations/{organization}/invitations"),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(InvitationsResponse::at(invitations, Timestamp::now())))
}
