//! Get Team Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::teams::records::{
    TeamDetailsRecord, TeamMemberDetailsRecord, TeamRecord,
};

use crate::{
    extensions::*, state::State, teams::errors::into_status_error,
    users::me::UserSummaryResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Uuid,

    /// The date and time the team was created
    pub created_at: String,

    /// The date and time the team was last updated
    pub updated_at: String,
}

impl From<TeamRecord> for TeamResponse {
    fn from(team: TeamRecord) -> Self {
        TeamResponse {
            uuid: team.uuid.into(),
            organization_uuid: team.organization_uuid.into(),
            name: team.name,
            description: team.description,
            created_by: team.created_by.into(),
            created_at: team.created_at.to_string(),
            updated_at: team.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamMemberDetailsResponse {
    pub uuid: Uuid,
    pub user: UserSummaryResponse,
    pub role: String,
    pub joined_at: String,
}

impl From<TeamMemberDetailsRecord> for TeamMemberDetailsResponse {
    fn from(member: TeamMemberDetailsRecord) -> Self {
        TeamMemberDetailsResponse {
            uuid: member.uuid.into(),
            user: member.user.into(),
            role: member.role.to_string(),
            joined_at: member.joined_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamDetailsResponse {
    pub team: TeamResponse,

    /// Members, oldest first
    pub members: Vec<TeamMemberDetailsResponse>,
}

impl From<TeamDetailsRecord> for TeamDetailsResponse {
    fn from(details: TeamDetailsRecord) -> Self {
        TeamDetailsResponse {
            team: details.team.into(),
            members: details.members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Team Handler
#[endpoint(
    tags("teams"),
    summary = "Get Team",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Team with members"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TeamDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let team = state
        .app
        .teams
        .get_team(user, team.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(team.into()))
}
