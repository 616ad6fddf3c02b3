//! Calendar Data

use jiff::Timestamp;
use rustc_hash::FxHashSet;

use crate::domain::{
    calendar::records::{EventType, EventUuid},
    teams::records::TeamUuid,
    users::records::UserUuid,
};

/// Colour used when an event does not name one.
pub const DEFAULT_EVENT_COLOR: &str = "blue";

/// New Event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub uuid: EventUuid,
    pub team: Option<TeamUuid>,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub location: Option<String>,
    pub color: Option<String>,
    pub is_all_day: bool,
    pub event_type: EventType,
    pub attendees: Vec<UserUuid>,
}

/// Event changes; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub location: Option<String>,
    pub color: Option<String>,
    pub is_all_day: Option<bool>,
    pub event_type: Option<EventType>,
}

/// Optional bounds on a calendar query.
///
/// Events must start at or after `from` and end at or before `to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Attendees in first-seen order without repeats.
pub(crate) fn unique_attendees(attendees: &[UserUuid]) -> Vec<UserUuid> {
    let mut seen = FxHashSet::default();

    attendees
        .iter()
        .copied()
        .filter(|attendee| seen.insert(*attendee))
        .collect()
}
