//! Task Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::tasks::TasksServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: TasksServiceError) -> StatusError {
    match &error {
        TasksServiceError::NotFound | TasksServiceError::TeamNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        TasksServiceError::AssigneeNotMember
        | TasksServiceError::MissingTitle
        | TasksServiceError::MissingContent
        | TasksServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        TasksServiceError::UpdateForbidden | TasksServiceError::DeleteForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        TasksServiceError::Permission(denied) => permission_denied(denied),
        TasksServiceError::Sql(source) => {
            error!("failed to process task request: {source}");

            StatusError::internal_server_error().brief("Failed to process task request")
        }
    }
}
