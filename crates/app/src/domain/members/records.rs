//! Member Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant,
        organizations::records::OrganizationUuid,
        users::records::{UserSummary, UserUuid},
    },
    uuids::TypedUuid,
};

/// Member UUID
pub type MemberUuid = TypedUuid<MemberRecord>;

/// Role a user holds within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    /// Roles allowed to perform administrative actions.
    pub const PRIVILEGED: &'static [Self] = &[Self::Owner, Self::Admin];

    /// Every role; used for checks that only require membership.
    pub const ANY: &'static [Self] = &[Self::Owner, Self::Admin, Self::Member];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    #[must_use]
    pub const fn is_privileged(self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl Display for MemberRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(UnknownVariant::new("member role", value)),
        }
    }
}

/// Member Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub uuid: MemberUuid,
    pub organization_uuid: OrganizationUuid,
    pub user_uuid: UserUuid,
    pub role: MemberRole,
    pub created_at: Timestamp,
}

/// Member joined with the user it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDetailsRecord {
    pub uuid: MemberUuid,
    pub organization_uuid: OrganizationUuid,
    pub user: UserSummary,
    pub role: MemberRole,
    pub created_at: Timestamp,
}
