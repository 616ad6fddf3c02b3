//! Tasks service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::permissions::PermissionDenied;

#[derive(Debug, Error)]
pub enum TasksServiceError {
    #[error("Task not found")]
    NotFound,

    #[error("Team not found")]
    TeamNotFound,

    #[error("Assignee is not a member of this organization")]
    AssigneeNotMember,

    #[error("Task title is required")]
    MissingTitle,

    #[error("Comment content is required")]
    MissingContent,

    #[error("invalid task data")]
    InvalidData,

    #[error("Only the creator, assignee or an admin can update this task")]
    UpdateForbidden,

    #[error("Only the creator or an admin can delete this task")]
    DeleteForbidden,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl TasksServiceError {
    /// Map a missing team row to [`Self::TeamNotFound`].
    pub(crate) fn from_team_lookup(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            Self::TeamNotFound
        } else {
            error.into()
        }
    }
}

impl From<Error> for TasksServiceError {
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
