//! Get Organization Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::organizations::records::OrganizationRecord;

use crate::{extensions::*, organizations::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrganizationResponse {
    pub uuid: Uuid,
    pub name: String,

    /// Globally unique, URL-safe identifier
    pub slug: String,

    pub logo: Option<String>,
    pub metadata: Option<String>,

    /// The date and time the organization was created
    pub created_at: String,
}

impl From<OrganizationRecord> for OrganizationResponse {
    fn from(organization: OrganizationRecord) -> Self {
        OrganizationResponse {
            uuid: organization.uuid.into(),
            name: organization.name,
            slug: organization.slug,
            logo: organization.logo,
            metadata: organization.metadata,
            created_at: organization.created_at.to_string(),
        }
    }
}

/// Get Organization Handler
#[endpoint(
    tags("organizations"),
    summary = "Get Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Organization"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Organization not found"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let organization = state
        .app
        .organizations
        .get_organization(user, organization.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(organization.into()))
}
