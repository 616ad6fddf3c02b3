//! Invitation Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant, members::records::MemberRole, organizations::records::OrganizationUuid,
        users::records::UserUuid,
    },
    uuids::TypedUuid,
};

/// Invitation UUID
pub type InvitationUuid = TypedUuid<InvitationRecord>;

/// Persisted invitation status. Expiry is never written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
}

impl InvitationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            _ => Err(UnknownVariant::new("invitation status", value)),
        }
    }
}

/// Invitation status as observed at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationState {
    Pending,
    Accepted,
    Expired,
}

impl InvitationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Expired => "expired",
        }
    }
}

impl Display for InvitationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Invitation Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationRecord {
    pub uuid: InvitationUuid,
    pub organization_uuid: OrganizationUuid,
    pub email: String,
    pub role: MemberRole,
    pub status: InvitationStatus,
    pub inviter_uuid: UserUuid,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
}

impl InvitationRecord {
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    /// Derive the effective state; accepted invitations never expire.
    #[must_use]
    pub fn state_at(&self, now: Timestamp) -> InvitationState {
        match self.status {
            InvitationStatus::Accepted => InvitationState::Accepted,
            InvitationStatus::Pending if self.is_expired_at(now) => InvitationState::Expired,
            InvitationStatus::Pending => InvitationState::Pending,
        }
    }
}

/// Invitation addressed to the current user, with its organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInvitationRecord {
    pub invitation: InvitationRecord,
    pub organization_name: String,
    pub organization_slug: String,
    pub state: InvitationState,
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;

    fn invitation(status: InvitationStatus, expires_at: Timestamp) -> InvitationRecord {
        InvitationRecord {
            uuid: InvitationUuid::new(),
            organization_uuid: OrganizationUuid::new(),
            email: "invitee@example.com".to_string(),
            role: MemberRole::Member,
            status,
            inviter_uuid: UserUuid::new(),
            expires_at,
            created_at: Timestamp::UNIX_EPOCH,
            accepted_at: None,
        }
    }

    #[test]
    fn pending_invitation_expires_at_deadline() {
        let deadline = Timestamp::UNIX_EPOCH + SignedDuration::from_hours(24);
        let invite = invitation(InvitationStatus::Pending, deadline);

        assert_eq!(
            invite.state_at(deadline - SignedDuration::from_secs(1)),
            InvitationState::Pending
        );
        assert_eq!(invite.state_at(deadline), InvitationState::Expired);
    }

    #[test]
    fn accepted_invitation_stays_accepted_after_deadline() {
        let invite = invitation(InvitationStatus::Accepted, Timestamp::UNIX_EPOCH);

        assert_eq!(
            invite.state_at(Timestamp::UNIX_EPOCH + SignedDuration::from_hours(1)),
            InvitationState::Accepted
        );
    }
}
