//! Check Permission Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use worknest_app::domain::{
    members::records::MemberRole,
    permissions::{AllowedRoles, default_allowed_roles},
};

use crate::{
    extensions::*, organizations::members::update::MemberResponse,
    permissions::errors::into_status_error, state::State,
};

/// Parse a comma separated role list, falling back to owners and admins.
fn allowed_roles(roles: Option<String>) -> Result<AllowedRoles, StatusError> {
    let Some(roles) = roles else {
        return Ok(default_allowed_roles());
    };

    let allowed = roles
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::parse::<MemberRole>)
        .collect::<Result<AllowedRoles, _>>()
        .or_400("could not parse \"roles\" query parameter")?;

    if allowed.is_empty() {
        Ok(default_allowed_roles())
    } else {
        Ok(allowed)
    }
}

/// Check Permission Handler
///
/// Returns the caller's membership when it holds one of `roles`.
#[endpoint(
    tags("organizations"),
    summary = "Check Permission",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Permission granted"),
        (status_code = StatusCode::FORBIDDEN, description = "Permission denied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    roles: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let allowed = allowed_roles(roles.into_inner())?;

    let member = state
        .app
        .permissions
        .check_user_permission(user, organization.into_inner().into(), allowed)
        .await
        .map_err(into_status_error)?;

    Ok(Json(member.into()))
}
