//! Create Organization Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::organizations::data::NewOrganization;

use crate::{
    extensions::*,
    organizations::{errors::into_status_error, get::OrganizationResponse},
    state::State,
};

/// Create Organization Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrganizationRequest {
    /// Client supplied UUID; generated when omitted
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub logo: Option<String>,
}

impl From<CreateOrganizationRequest> for NewOrganization {
    fn from(request: CreateOrganizationRequest) -> Self {
        NewOrganization {
            uuid: request.uuid.unwrap_or_else(Uuid::now_v7).into(),
            name: request.name,
            slug: request.slug,
            logo: request.logo,
        }
    }
}

/// Create Organization Handler
///
/// The caller becomes the organization's owner.
#[endpoint(
    tags("organizations"),
    summary = "Create Organization",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Organization created"),
        (status_code = StatusCode::CONFLICT, description = "Organization slug already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrganizationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrganizationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let organization = state
        .app
        .organizations
        .create_organization(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/organizations/{}", organization.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(organization.into()))
}
