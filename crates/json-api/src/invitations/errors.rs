//! Invitation Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::invitations::InvitationsServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: InvitationsServiceError) -> StatusError {
    match &error {
        InvitationsServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        InvitationsServiceError::AlreadyAccepted | InvitationsServiceError::AlreadyMember => {
            StatusError::conflict().brief(error.to_string())
        }
        InvitationsServiceError::Expired => StatusError::gone().brief(error.to_string()),
        InvitationsServiceError::NoRecipients
        | InvitationsServiceError::InvalidEmail(_)
        | InvitationsServiceError::OwnerRoleNotInvitable
        | InvitationsServiceError::InvalidData => {
            StatusError::bad_request().brief(error.to_string())
        }
        InvitationsServiceError::InviteForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        InvitationsServiceError::Permission(denied) => permission_denied(denied),
        InvitationsServiceError::Sql(source) => {
            error!("failed to process invitation request: {source}");

            StatusError::internal_server_error().brief("Failed to process invitation request")
        }
    }
}
