//! Get Candidate Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::recruitment::records::CandidateDetailsRecord;

use crate::{
    candidates::{CandidateDocumentResponse, CandidateResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CandidateDetailsResponse {
    pub candidate: CandidateResponse,
    pub documents: Vec<CandidateDocumentResponse>,
}

impl From<CandidateDetailsRecord> for CandidateDetailsResponse {
    fn from(details: CandidateDetailsRecord) -> Self {
        CandidateDetailsResponse {
            candidate: details.candidate.into(),
            documents: details.documents.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Candidate Handler
#[endpoint(
    tags("candidates"),
    summary = "Get Candidate",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Candidate with uploaded documents"),
        (status_code = StatusCode::FORBIDDEN, description = "Requires owner or admin"),
        (status_code = StatusCode::NOT_FOUND, description = "Candidate not found"),
    ),
)]
pub(crate) async fn handler(
    candidate: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CandidateDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let candidate = state
        .app
        .recruitment
        .get_candidate(user, candidate.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(candidate.into()))
}
