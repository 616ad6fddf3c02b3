//! Recruitment service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{permissions::PermissionDenied, recruitment::records::CandidateStatus};

#[derive(Debug, Error)]
pub enum RecruitmentServiceError {
    #[error("Candidate not found")]
    NotFound,

    /// Unknown token on the applicant's read path.
    #[error("Invalid or expired invitation")]
    UnknownToken,

    /// Unknown token on the applicant's write paths.
    #[error("Invalid invitation")]
    InvalidInvitation,

    #[error("Invitation has expired")]
    Expired,

    #[error("Application already submitted")]
    AlreadySubmitted,

    #[error("Cannot move candidate from {from} to {to}")]
    InvalidTransition {
        from: CandidateStatus,
        to: CandidateStatus,
    },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Name, phone, date of birth and address are required")]
    MissingRequiredData,

    #[error("File name, URL and a non-negative size are required")]
    InvalidDocument,

    #[error("Only owners and admins can manage candidates")]
    ManageForbidden,

    #[error("invalid candidate data")]
    InvalidData,

    #[error(transparent)]
    Permission(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl RecruitmentServiceError {
    /// Map a missing candidate row to `missing`.
    pub(crate) fn from_token_lookup(error: Error, missing: Self) -> Self {
        if matches!(error, Error::RowNotFound) {
            missing
        } else {
            error.into()
        }
    }
}

impl From<Error> for RecruitmentServiceError {
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
