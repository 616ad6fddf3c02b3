//! Get Event Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::calendar::records::EventDetailsRecord;

use crate::{
    events::{AttendeeResponse, EventResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct EventDetailsResponse {
    pub event: EventResponse,
    pub attendees: Vec<AttendeeResponse>,
}

impl From<EventDetailsRecord> for EventDetailsResponse {
    fn from(details: EventDetailsRecord) -> Self {
        EventDetailsResponse {
            event: details.event.into(),
            attendees: details.attendees.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Event Handler
#[endpoint(
    tags("events"),
    summary = "Get Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Event with attendees"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Event not found"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<EventDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let event = state
        .app
        .calendar
        .get_event(user, event.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(event.into()))
}
