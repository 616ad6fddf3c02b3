//! Submit Application Handler

use std::sync::Arc;

use jiff::civil::Date;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::recruitment::data::CandidateSubmission;

use crate::{
    candidates::{CandidateResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Submit Application Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmitApplicationRequest {
    pub name: String,
    pub phone: String,

    /// `YYYY-MM-DD`
    pub date_of_birth: String,

    pub address: String,
}

impl TryFrom<SubmitApplicationRequest> for CandidateSubmission {
    type Error = StatusError;

    fn try_from(request: SubmitApplicationRequest) -> Result<Self, Self::Error> {
        Ok(CandidateSubmission {
            name: request.name,
            phone: request.phone,
            date_of_birth: request
                .date_of_birth
                .parse::<Date>()
                .or_400("Invalid date_of_birth")?,
            address: request.address,
        })
    }
}

/// Submit Application Handler
///
/// Each application token can submit once.
#[endpoint(
    tags("applications"),
    summary = "Submit Application",
    responses(
        (status_code = StatusCode::OK, description = "Application submitted"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid or expired invitation"),
        (status_code = StatusCode::GONE, description = "Invitation has expired"),
        (status_code = StatusCode::CONFLICT, description = "Application already submitted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<Uuid>,
    json: JsonBody<SubmitApplicationRequest>,
    depot: &mut Depot,
) -> Result<Json<CandidateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let candidate = state
        .app
        .recruitment
        .submit_candidate_info(token.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(candidate.into()))
}
