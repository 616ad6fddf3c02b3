//! Update Member Role Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::members::records::{MemberRecord, MemberRole};

use crate::{extensions::*, organizations::errors::into_status_error, state::State};

/// Update Member Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateMemberRoleRequest {
    /// One of `owner`, `admin` or `member`
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MemberResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,
    pub user_uuid: Uuid,
    pub role: String,

    /// The date and time the user joined
    pub created_at: String,
}

impl From<MemberRecord> for MemberResponse {
    fn from(member: MemberRecord) -> Self {
        MemberResponse {
            uuid: member.uuid.into(),
            organization_uuid: member.organization_uuid.into(),
            user_uuid: member.user_uuid.into(),
            role: member.role.to_string(),
            created_at: member.created_at.to_string(),
        }
    }
}

/// Update Member Role Handler
#[endpoint(
    tags("organizations"),
    summary = "Update Member Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Member updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners and admins can update roles"),
        (status_code = StatusCode::NOT_FOUND, description = "Member not found"),
        (status_code = StatusCode::CONFLICT, description = "An organization must keep at least one owner"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    member: PathParam<Uuid>,
    json: JsonBody<UpdateMemberRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<MemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let role = json
        .into_inner()
        .role
        .parse::<MemberRole>()
        .or_400("Invalid role")?;

    let member = state
        .app
        .organizations
        .update_member_role(
            user,
            organization.into_inner().into(),
            member.into_inner().into(),
            role,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}
