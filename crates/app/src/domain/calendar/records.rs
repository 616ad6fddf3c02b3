//! Calendar Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant,
        organizations::records::OrganizationUuid,
        teams::records::TeamUuid,
        users::records::{UserSummary, UserUuid},
    },
    uuids::TypedUuid,
};

/// Event UUID
pub type EventUuid = TypedUuid<EventRecord>;

/// Attendee UUID
pub type AttendeeUuid = TypedUuid<AttendeeRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    #[default]
    Meeting,
    Deadline,
    Task,
    Holiday,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Deadline => "deadline",
            Self::Task => "task",
            Self::Holiday => "holiday",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "meeting" => Ok(Self::Meeting),
            "deadline" => Ok(Self::Deadline),
            "task" => Ok(Self::Task),
            "holiday" => Ok(Self::Holiday),
            _ => Err(UnknownVariant::new("event type", value)),
        }
    }
}

/// An attendee's answer to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttendeeStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl AttendeeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl Display for AttendeeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendeeStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(UnknownVariant::new("attendee status", value)),
        }
    }
}

/// The statuses an attendee can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeResponse {
    Accepted,
    Declined,
}

impl From<AttendeeResponse> for AttendeeStatus {
    fn from(response: AttendeeResponse) -> Self {
        match response {
            AttendeeResponse::Accepted => Self::Accepted,
            AttendeeResponse::Declined => Self::Declined,
        }
    }
}

impl FromStr for AttendeeResponse {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(UnknownVariant::new("attendee response", value)),
        }
    }
}

/// Event Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub uuid: EventUuid,
    pub organization_uuid: OrganizationUuid,

    /// `None` for organization-wide events.
    pub team_uuid: Option<TeamUuid>,

    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: Option<String>,
    pub color: String,
    pub is_all_day: bool,
    pub event_type: EventType,
    pub created_by: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event as listed on a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummaryRecord {
    pub event: EventRecord,
    pub creator: UserSummary,
    pub attendee_count: i64,
}

/// Attendee Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeRecord {
    pub uuid: AttendeeUuid,
    pub event_uuid: EventUuid,
    pub user: UserSummary,
    pub status: AttendeeStatus,
    pub added_at: Timestamp,
}

/// An event with its attendees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetailsRecord {
    pub event: EventRecord,
    pub attendees: Vec<AttendeeRecord>,
}
