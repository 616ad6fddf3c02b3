//! Event Errors

use salvo::http::StatusError;
use tracing::error;

use worknest_app::domain::calendar::CalendarServiceError;

use crate::permissions::errors::permission_denied;

pub(crate) fn into_status_error(error: CalendarServiceError) -> StatusError {
    match &error {
        CalendarServiceError::NotFound
        | CalendarServiceError::TeamNotFound
        | CalendarServiceError::AttendeeNotFound => {
            StatusError::not_found().brief(error.to_string())
        }
        CalendarServiceError::AttendeeNotMember
        | CalendarServiceError::MissingTitle
        | CalendarServiceError::InvalidTimeRange
        | CalendarServiceError::InvalidData => StatusError::bad_request().brief(error.to_string()),
        CalendarServiceError::UpdateForbidden | CalendarServiceError::DeleteForbidden => {
            StatusError::forbidden().brief(error.to_string())
        }
        CalendarServiceError::Permission(denied) => permission_denied(denied),
        CalendarServiceError::Sql(source) => {
            error!("failed to process event request: {source}");

            StatusError::internal_server_error().brief("Failed to process event request")
        }
    }
}
