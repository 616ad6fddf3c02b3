//! Get Application Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::recruitment::records::ApplicationRecord;

use crate::{candidates::errors::into_status_error, extensions::*, state::State};

/// What an applicant sees about their own invitation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicationResponse {
    pub candidate_uuid: Uuid,
    pub organization_name: String,
    pub email: String,
    pub position: Option<String>,
    pub status: String,
    pub expires_at: String,
    pub submitted_at: Option<String>,
}

impl From<ApplicationRecord> for ApplicationResponse {
    fn from(application: ApplicationRecord) -> Self {
        ApplicationResponse {
            candidate_uuid: application.candidate_uuid.into(),
            organization_name: application.organization_name,
            email: application.email,
            position: application.position,
            status: application.status.to_string(),
            expires_at: application.expires_at.to_string(),
            submitted_at: application.submitted_at.map(|at| at.to_string()),
        }
    }
}

/// Get Application Handler
#[endpoint(
    tags("applications"),
    summary = "Get Application",
    responses(
        (status_code = StatusCode::OK, description = "Application"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid or expired invitation"),
        (status_code = StatusCode::GONE, description = "Invitation has expired"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ApplicationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let application = state
        .app
        .recruitment
        .get_candidate_by_token(token.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(application.into()))
}
