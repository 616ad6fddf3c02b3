//! Teams service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::permissions::PermissionDenied;

#[derive(Debug, Error)]
pub enum TeamsServiceError {
    #[error("Team not found")]
    NotFound,

    #[error("Team member not found")]
    MemberNotFound,

    #[error("User is not a member of this organization")]
    NotOrganizationMember,

    #[error("User is already a team member")]
    AlreadyTeamMember,

    #[error("Team name is required")]
    MissingRequiredData,

    #[error("invalid team data")]
    InvalidData,

    #[error("Only owners and admins can create teams")]
    CreateForbidden,

    #[error("Only owners and admins can update teams")]
    UpdateForbidden,

    #[error("Only owners and admins can delete teams")]
    DeleteForbidden,

    #[error("Only owners, admins and team leads can manage team members")]
    ManageMembersForbidden,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl TeamsServiceError {
    /// Map a missing team member row to [`Self::MemberNotFound`].
    pub(crate) fn from_member_lookup(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            Self::MemberNotFound
        } else {
            error.into()
        }
    }
}

impl From<Error> for TeamsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyTeamMember,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
