//! Team Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::teams::TeamsServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: TeamsServiceError) -> StatusError {
    match &error {
        TeamsServiceError::NotFound | TeamsServiceError::MemberNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        TeamsServiceError::AlreadyTeamMember => StatusError::conflict().brief(error.to_string()),
        TeamsServiceError::NotOrganizationMember
        | TeamsServiceError::MissingRequiredData
        | TeamsServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        TeamsServiceError::CreateForbidden
        | TeamsServiceError::UpdateForbidden
        | TeamsServiceError::DeleteForbidden
        | TeamsServiceError::ManageMembersForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        TeamsServiceError::Permission(denied) => permission_denied(denied),
        TeamsServiceError::Sql(source) => {
            error!("failed to process team request: {source}");

            StatusError::internal_server_error().brief("Failed to process team request")
        }
    }
}
