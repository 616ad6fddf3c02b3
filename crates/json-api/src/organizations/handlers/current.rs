//! Current Organization Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, get::OrganizationResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CurrentOrganizationResponse {
    /// The first organization the caller joined, if any
    pub organization: Option<OrganizationResponse>,
}

/// Current Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Get Current Organization",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CurrentOrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let organization = state
        .app
        .organizations
        .get_user_organization(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CurrentOrganizationResponse {
        organization: organization.map(Into::into),
    }))
}
