//! Calendar service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::permissions::PermissionDenied;

#[derive(Debug, Error)]
pub enum CalendarServiceError {
    #[error("Event not found")]
    NotFound,

    #[error("Team not found")]
    TeamNotFound,

    #[error("Attendee not found")]
    AttendeeNotFound,

    #[error("Attendee is not a member of this organization")]
    AttendeeNotMember,

    #[error("Event title is required")]
    MissingTitle,

    #[error("Event must end after it starts")]
    InvalidTimeRange,

    #[error("invalid event data")]
    InvalidData,

    #[error("Only the creator or an admin can update this event")]
    UpdateForbidden,

    #[error("Only the creator or an admin can delete this event")]
    DeleteForbidden,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl CalendarServiceError {
    /// Map a missing team row to [`Self::TeamNotFound`].
    pub(crate) fn from_team_lookup(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            Self::TeamNotFound
        } else {
            error.into()
        }
    }

    /// Map a missing attendee row to [`Self::AttendeeNotFound`].
    pub(crate) fn from_attendee_lookup(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            Self::AttendeeNotFound
        } else {
            error.into()
        }
    }
}

impl From<Error> for CalendarServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::Other
                | _,
            )
            | None => Self::Sql(error),
        }
    }
}
