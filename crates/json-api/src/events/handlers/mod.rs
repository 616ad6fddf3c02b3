//! Event Handlers

pub(crate) mod all;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod team_index;
pub(crate) mod update;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::StatusError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::calendar::{
    data::EventRange,
    records::{AttendeeRecord, EventRecord, EventSummaryRecord},
};

use crate::{extensions::*, users::me::UserSummaryResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,

    /// Absent for organization-wide events
    pub team_uuid: Option<Uuid>,

    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub color: String,
    pub is_all_day: bool,

    /// `meeting`, `deadline`, `task` or `holiday`
    pub event_type: String,

    pub created_by: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EventRecord> for EventResponse {
    fn from(event: EventRecord) -> Self {
        EventResponse {
            uuid: event.uuid.into(),
            organization_uuid: event.organization_uuid.into(),
            team_uuid: event.team_uuid.map(Into::into),
            title: event.title,
            description: event.description,
            start_time: event.start_time.to_string(),
            end_time: event.end_time.to_string(),
            location: event.location,
            color: event.color,
            is_all_day: event.is_all_day,
            event_type: event.event_type.to_string(),
            created_by: event.created_by.into(),
            created_at: event.created_at.to_string(),
            updated_at: event.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AttendeeResponse {
    pub uuid: Uuid,
    pub event_uuid: Uuid,
    pub user: UserSummaryResponse,

    /// `pending`, `accepted` or `declined`
    pub status: String,

    pub added_at: String,
}

impl From<AttendeeRecord> for AttendeeResponse {
    fn from(attendee: AttendeeRecord) -> Self {
        AttendeeResponse {
            uuid: attendee.uuid.into(),
            event_uuid: attendee.event_uuid.into(),
            user: attendee.user.into(),
            status: attendee.status.to_string(),
            added_at: attendee.added_at.to_string(),
        }
    }
}

/// A listed event with its creator and how many people were invited.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventSummaryResponse {
    pub event: EventResponse,
    pub creator: UserSummaryResponse,
    pub attendee_count: i64,
}

impl From<EventSummaryRecord> for EventSummaryResponse {
    fn from(summary: EventSummaryRecord) -> Self {
        EventSummaryResponse {
            event: summary.event.into(),
            creator: summary.creator.into(),
            attendee_count: summary.attendee_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventsResponse {
    pub events: Vec<EventSummaryResponse>,
}

impl From<Vec<EventSummaryRecord>> for EventsResponse {
    fn from(events: Vec<EventSummaryRecord>) -> Self {
        EventsResponse {
            events: events.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build the listing window from the `from` and `to` query parameters.
pub(crate) fn event_range(
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
) -> Result<EventRange, StatusError> {
    Ok(EventRange {
        from: from.into_timestamp("from")?,
        to: to.into_timestamp("to")?,
    })
}
