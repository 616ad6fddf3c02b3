//! Organizations service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::permissions::PermissionDenied;

#[derive(Debug, Error)]
pub enum OrganizationsServiceError {
    #[error("Organization slug already exists")]
    SlugTaken,

    #[error("Organization not found")]
    NotFound,

    #[error("Member not found")]
    MemberNotFound,

    #[error("Name and slug are required")]
    MissingRequiredData,

    #[error("Slug may only contain lowercase letters, numbers and hyphens")]
    InvalidSlug,

    #[error("invalid organization data")]
    InvalidData,

    #[error("Only owners and admins can update roles")]
    RoleUpdateForbidden,

    #[error("Only owners can grant or revoke the owner role")]
    OwnerRoleForbidden,

    #[error("An organization must keep at least one owner")]
    LastOwner,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrganizationsServiceError {
    /// Map a missing member row to [`Self::MemberNotFound`].
    pub(crate) fn from_member_lookup(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            Self::MemberNotFound
        } else {
            error.into()
        }
    }
}

impl From<Error> for OrganizationsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::SlugTaken,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::ForeignKeyViolation | ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
