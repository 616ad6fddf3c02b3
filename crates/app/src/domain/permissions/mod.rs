//! Membership Authority
//!
//! Resolves a (user, organization) pair to a membership and compares its role
//! against an allow-list. Every other domain service runs the same check
//! inside its own transaction via [`authorize`].

pub mod errors;
pub mod service;

use smallvec::SmallVec;

use crate::domain::members::records::{MemberRecord, MemberRole};

pub use errors::{PermissionDenied, PermissionsServiceError};
pub use service::*;

/// Caller-supplied set of roles accepted by a permission check.
pub type AllowedRoles = SmallVec<[MemberRole; 3]>;

/// The allow-list used when a caller does not supply one.
#[must_use]
pub fn default_allowed_roles() -> AllowedRoles {
    AllowedRoles::from_slice(MemberRole::PRIVILEGED)
}

/// Accept `membership` if it exists and its role is in `allowed`.
pub fn authorize(
    membership: Option<MemberRecord>,
    allowed: &[MemberRole],
) -> Result<MemberRecord, PermissionDenied> {
    let member = membership.ok_or(PermissionDenied::NotMember)?;

    if allowed.contains(&member.role) {
        Ok(member)
    } else {
        Err(PermissionDenied::RoleRequired(AllowedRoles::from_slice(
            allowed,
        )))
    }
}

/// Like [`authorize`], reporting a failed role check as `forbidden`.
///
/// Missing memberships still surface as [`PermissionDenied::NotMember`].
pub fn authorize_or<E>(
    membership: Option<MemberRecord>,
    allowed: &[MemberRole],
    forbidden: E,
) -> Result<MemberRecord, E>
where
    E: From<PermissionDenied>,
{
    authorize(membership, allowed).map_err(|denied| match denied {
        PermissionDenied::RoleRequired(_) => forbidden,
        PermissionDenied::NotMember => denied.into(),
    })
}
