//! Team Records

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

/// Team UUID
pub type TeamUuid = TypedUuid<TeamRecord>;

/// Team Member UUID
pub type TeamMemberUuid = TypedUuid<TeamMemberRecord>;

/// Role a user holds within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeamMemberRole {
    /// May manage the team's membership.
    Lead,
    #[default]
    Member,
}

impl TeamMemberRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Member => "member",
        }
    }
}

impl Display for TeamMemberRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamMemberRole {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lead" => Ok(Self::Lead),
            "member" => Ok(Self::Member),
            _ => Err(UnknownVariant::new("team member role", value)),
        }
    }
}

/// Team Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRecord {
    pub uuid: TeamUuid,
    pub organization_uuid: OrganizationUuid,
    pub name: String,
    pub description: Option<String>,
    pub created_by: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Team listed with the size of its membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummaryRecord {
    pub team: TeamRecord,
    pub member_count: i64,
}

/// Team Member Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberRecord {
    pub uuid: TeamMemberUuid,
    pub team_uuid: TeamUuid,
    pub user_uuid: UserUuid,
    pub role: TeamMemberRole,
    pub joined_at: Timestamp,
}

/// Team member joined with the user it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMemberDetailsRecord {
    pub uuid: TeamMemberUuid,
    pub team_uuid: TeamUuid,
    pub user: UserSummary,
    pub role: TeamMemberRole,
    pub joined_at: Timestamp,
}

/// A team together with its members, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDetailsRecord {
    pub team: TeamRecord,
    pub members: Vec<TeamMemberDetailsRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_roles_default_to_member() {
        assert_eq!(TeamMemberRole::default(), TeamMemberRole::Member);
    }

    #[test]
    fn team_roles_parse_from_storage_form() {
        assert_eq!("lead".parse::<TeamMemberRole>(), Ok(TeamMemberRole::Lead));
        assert_eq!("member".parse::<TeamMemberRole>(), Ok(TeamMemberRole::Member));
        assert!("owner".parse::<TeamMemberRole>().is_err());
    }
}
