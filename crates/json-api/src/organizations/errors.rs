//! Organization Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::organizations::OrganizationsServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: OrganizationsServiceError) -> StatusError {
    match &error {
        OrganizationsServiceError::NotFound | OrganizationsServiceError::MemberNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        OrganizationsServiceError::SlugTaken | OrganizationsServiceError::LastOwner => {
            StatusError::conflict().brief(error.to_string())
        }
        OrganizationsServiceError::MissingRequiredData
        | OrganizationsServiceError::InvalidSlug
        | OrganizationsServiceError::InvalidData => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrganizationsServiceError::RoleUpdateForbidden
        | OrganizationsServiceError::OwnerRoleForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        OrganizationsServiceError::Permission(denied) => permission_denied(denied),
        OrganizationsServiceError::Sql(source) => {
            error!("failed to process organization request: {source}");

            StatusError::internal_server_error().brief("Failed to process organization request")
        }
    }
}
