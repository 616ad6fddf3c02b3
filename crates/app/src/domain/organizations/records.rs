//! Organization Records

use jiff::Timestamp;

use crate::{domain::members::records::MemberRole, uuids::TypedUuid};

/// Organization UUID
pub type OrganizationUuid = TypedUuid<OrganizationRecord>;

/// Organization Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub uuid: OrganizationUuid,
    pub name: String,

    /// Globally unique, URL-safe identifier.
    pub slug: String,

    pub logo: Option<String>,
    pub metadata: Option<String>,
    pub created_at: Timestamp,
}

/// An organization seen from one of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserOrganizationRecord {
    pub organization: OrganizationRecord,
    pub role: MemberRole,
    pub joined_at: Timestamp,
}
