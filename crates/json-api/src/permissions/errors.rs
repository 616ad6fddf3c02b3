//! Permission Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::permissions::{PermissionDenied, PermissionsServiceError};

/// Every failed membership or role check answers `403`.
pub(crate) fn permission_denied(denied: &PermissionDenied) -> StatusError {
    StatusError::forbidden().brief(denied.to_string())
}

pub(crate) fn into_status_error(error: PermissionsServiceError) -> StatusError {
    match error {
        PermissionsServiceError::Denied(denied) => permission_denied(&denied),
        PermissionsServiceError::Sql(source) => {
            error!("failed to check permissions: {source}");

            StatusError::internal_server_error().brief("Failed to check permissions")
        }
    }
}
