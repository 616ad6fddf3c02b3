//! Update Team Handler

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

use worknest_app::domain::teams::data::TeamUpdate;

use crate::{
    extensions::*,
    state::State,
    teams::{errors::into_status_error, get::TeamResponse},
};

/// Update Team Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Option<String>,

    /// A blank description clears it
    #[serde(default)]
    pub description: Option<String>,
}

impl From<UpdateTeamRequest> for TeamUpdate {
    fn from(request: UpdateTeamRequest) -> Self {
        TeamUpdate {
            name: request.name,
            description: request.description,
        }
    }
}

/// Update Team Handler
#[endpoint(
    tags("teams"),
    summary = "Update Team",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Team updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only owners and admins can update teams"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
    json: JsonBody<UpdateTeamRequest>,
    depot: &mut Depot,
) -> Result<Json<TeamResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let team = state
        .app
        .teams
        .update_team(user, team.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(team.into()))
}
