//! Permission errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::{members::records::MemberRole, permissions::AllowedRoles};

/// Reason a permission check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionDenied {
    #[error("Not a member of this organization")]
    NotMember,

    #[error("Requires one of these roles: {}", join_roles(.0))]
    RoleRequired(AllowedRoles),
}

fn join_roles(roles: &[MemberRole]) -> String {
    roles
        .iter()
        .copied()
        .map(MemberRole::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum PermissionsServiceError {
    #[error(transparent)]
    Denied(#[from] PermissionDenied),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PermissionsServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
