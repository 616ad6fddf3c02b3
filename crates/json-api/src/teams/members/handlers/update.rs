//! Update Team Member Role Handler

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

use worknest_app::domain::teams::records::TeamMemberRole;

use crate::{
    extensions::*,
    state::State,
    teams::{errors::into_status_error, members::TeamMemberResponse},
};

/// Update Team Member Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateTeamMemberRequest {
    /// `lead` or `member`
    pub role: String,
}

/// Update Team Member Role Handler
#[endpoint(
    tags("teams"),
    summary = "Update Team Member Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Team member updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners, admins and team leads can manage team members"),
        (status_code = StatusCode::NOT_FOUND, description = "Team member not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    user: PathParam<Uuid>,
    json: JsonBody<UpdateTeamMemberRequest>,
    depot: &mut Depot,
) -> Result<Json<TeamMemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.current_user_or_401()?;

    let role = json
        .into_inner()
        .role
        .parse::<TeamMemberRole>()
        .or_400("Invalid team role")?;

    let member = state
        .app
        .teams
        .update_team_member_role(
            caller,
            team.into_inner().into(),
            user.into_inner().into(),
            role,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}
