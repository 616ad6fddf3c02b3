//! User Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match &error {
        UsersServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        UsersServiceError::AlreadyExists => StatusError::conflict().brief(error.to_string()),
        UsersServiceError::MissingRequiredData
        | UsersServiceError::InvalidEmail
        | UsersServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        UsersServiceError::Sql(source) => {
            error!("failed to load user: {source}");

            StatusError::internal_server_error().brief("Failed to load user")
        }
    }
}
