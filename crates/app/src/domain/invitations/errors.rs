//! Invitations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::permissions::PermissionDenied;

#[derive(Debug, Error)]
pub enum InvitationsServiceError {
    #[error("Invitation not found")]
    NotFound,

    #[error("Invitation has already been accepted")]
    AlreadyAccepted,

    #[error("Invitation has expired")]
    Expired,

    #[error("Already a member of this organization")]
    AlreadyMember,

    #[error("At least one email address is required")]
    NoRecipients,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invitations cannot grant the owner role")]
    OwnerRoleNotInvitable,

    #[error("Only owners and admins can invite members")]
    InviteForbidden,

    #[error("invalid invitation data")]
    InvalidData,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InvitationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyMember,
            Some(ErrorKind::CheckViolation | ErrorKind::NotNullViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
