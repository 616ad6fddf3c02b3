//! Team Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::teams::records::TeamSummaryRecord;

use crate::{
    extensions::*,
    state::State,
    teams::{errors::into_status_error, get::TeamResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamSummaryResponse {
    pub team: TeamResponse,
    pub member_count: i64,
}

impl From<TeamSummaryRecord> for TeamSummaryResponse {
    fn from(summary: TeamSummaryRecord) -> Self {
        TeamSummaryResponse {
            team: summary.team.into(),
            member_count: summary.member_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamsResponse {
    pub teams: Vec<TeamSummaryResponse>,
}

/// Team Index Handler
///
/// Lists an organization's teams, newest first.
#[endpoint(
    tags("teams"),
    summary = "List Teams",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TeamsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let teams = state
        .app
        .teams
        .list_organization_teams(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(TeamsResponse {
        teams: teams.into_iter().map(Into::into).collect(),
    }))
}
