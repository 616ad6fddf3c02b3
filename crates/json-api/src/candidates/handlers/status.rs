//! Update Candidate Status Handler

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

use worknest_app::domain::recruitment::records::CandidateStatus;

use crate::{
    candidates::{CandidateResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Candidate Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCandidateStatusRequest {
    /// `reviewing`, `approved` or `rejected`
    pub status: String,

    #[serde(default)]
    pub notes: Option<String>,
}

/// Update Candidate Status Handler
#[endpoint(
    tags("candidates"),
    summary = "Update Candidate Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Candidate status updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Requires owner or admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Candidate not found"),
        (status_code = StatusCode::CONFLICT, description = "Status transition not allowed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    candidate: PathParam<Uuid>,
    json: JsonBody<UpdateCandidateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<CandidateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let request = json.into_inner();

    let status = request
        .status
        .parse::<CandidateStatus>()
        .or_400("Invalid candidate status")?;

    let candidate = state
        .app
        .recruitment
        .update_candidate_status(user, candidate.into_inner().into(), status, request.notes)
        .await
        .map_err(into_status_error)?;

    Ok(Json(candidate.into()))
}
