//! Organization Invitation Index Handler

use std::{string::ToString, sync::Arc};

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::invitations::records::InvitationRecord;

use crate::{extensions::*, invitations::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvitationResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,
    pub email: String,
    pub role: String,

    /// `pending`, `accepted` or `expired` at the time of the request
    pub state: String,

    pub inviter_uuid: Uuid,
    pub expires_at: String,
    pub created_at: String,
    pub accepted_at: Option<String>,
}

impl InvitationResponse {
    pub(crate) fn at(invitation: InvitationRecord, now: Timestamp) -> Self {
        InvitationResponse {
            state: invitation.state_at(now).to_string(),
            uuid: invitation.uuid.into(),
            organization_uuid: invitation.organization_uuid.into(),
            email: invitation.email,
            role: invitation.role.to_string(),
            inviter_uuid: invitation.inviter_uuid.into(),
            expires_at: invitation.expires_at.to_string(),
            created_at: invitation.created_at.to_string(),
            accepted_at: invitation.accepted_at.as_ref().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct InvitationsResponse {
    pub invitations: Vec<InvitationResponse>,
}

impl InvitationsResponse {
    pub(crate) fn at(invitations: Vec<InvitationRecord>, now: Timestamp) -> Self {
        InvitationsResponse {
            invitations: invitations
                .into_iter()
                .map(|invitation| InvitationResponse::at(invitation, now))
                .collect(),
        }
    }
}

/// Organization Invitation Index Handler
///
/// Lists every invitation issued by an organization, newest first.
#[endpoint(
    tags("invitations"),
    summary = "List Organization Invitations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<InvitationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let invitations = state
        .app
        .invitations
        .list_organization_invitations(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(InvitationsResponse::at(invitations, Timestamp::now())))
}
