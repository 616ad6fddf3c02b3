//! Candidate Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::recruitment::RecruitmentServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: RecruitmentServiceError) -> StatusError {
    match &error {
        RecruitmentServiceError::NotFound | RecruitmentServiceError::UnknownToken => {
            StatusError::not_found().brief(error.to_string())
        }
        RecruitmentServiceError::Expired => StatusError::gone().brief(error.to_string()),
        RecruitmentServiceError::AlreadySubmitted
        | RecruitmentServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        RecruitmentServiceError::InvalidInvitation
        | RecruitmentServiceError::InvalidEmail
        | RecruitmentServiceError::MissingRequiredData
        | RecruitmentServiceError::InvalidDocument
        | RecruitmentServiceError::InvalidData => {
            StatusError::bad_request().brief(error.to_string())
        }
        RecruitmentServiceError::ManageForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        RecruitmentServiceError::Permission(denied) => permission_denied(denied),
        RecruitmentServiceError::Sql(source) => {
            error!("failed to process candidate request: {source}");

            StatusError::internal_server_error().brief("Failed to process candidate request")
        }
    }
}
