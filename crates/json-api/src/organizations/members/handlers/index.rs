//! Member Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::members::records::MemberDetailsRecord;

use crate::{
    extensions::*, organizations::errors::into_status_error, state::State,
    users::me::UserSummaryResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberDetailsResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,
    pub user: UserSummaryResponse,
    pub role: String,

    /// The date and time the user joined
    pub created_at: String,
}

impl From<MemberDetailsRecord> for MemberDetailsResponse {
    fn from(member: MemberDetailsRecord) -> Self {
        MemberDetailsResponse {
            uuid: member.uuid.into(),
            organization_uuid: member.organization_uuid.into(),
            user: member.user.into(),
            role: member.role.to_string(),
            created_at: member.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MembersResponse {
    pub members: Vec<MemberDetailsResponse>,
}

/// Member Index Handler
///
/// Lists the members of an organization the caller belongs to.
#[endpoint(
    tags("organizations"),
    summary = "List Members",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<MembersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let members = state
        .app
        .organizations
        .list_organization_members(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(MembersResponse {
        members: members.into_iter().map(Into::into).collect(),
    }))
}
