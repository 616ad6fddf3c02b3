//! Organization Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use worknest_app::domain::organizations::records::UserOrganizationRecord;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, get::OrganizationResponse},
    state::State,
};

/// An organization with the caller's role in it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserOrganizationResponse {
    pub organization: OrganizationResponse,
    pub role: String,

    /// The date and time the caller joined
    pub joined_at: String,
}

impl From<UserOrganizationRecord> for UserOrganizationResponse {
    fn from(record: UserOrganizationRecord) -> Self {
        UserOrganizationResponse {
            organization: record.organization.into(),
            role: record.role.to_string(),
            joined_at: record.joined_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationsResponse {
    pub organizations: Vec<UserOrganizationResponse>,
}

/// Organization Index Handler
///
/// Returns every organization the caller belongs to.
#[endpoint(
    tags("organizations"),
    summary = "List Organizations",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrganizationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let organizations = state
        .app
        .organizations
        .list_user_organizations(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrganizationsResponse {
        organizations: organizations.into_iter().map(Into::into).collect(),
    }))
}
