//! Create Event Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::calendar::{data::NewEvent, records::EventType};

use crate::{
    events::{errors::into_status_error, get::EventDetailsResponse},
    extensions::*,
    state::State,
};

/// Create Event Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateEventRequest {
    #[serde(default)]
    pub uuid: Option<Uuid>,

    /// Put the event on a team calendar instead of the organization calendar
    #[serde(default)]
    pub team_uuid: Option<Uuid>,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    /// RFC 3339 timestamp
    pub start_time: String,

    /// RFC 3339 timestamp, after `start_time`
    pub end_time: String,

    #[serde(default)]
    pub location: Option<String>,

    /// Defaults to `blue`
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub is_all_day: bool,

    /// Defaults to `meeting`
    #[serde(default)]
    pub event_type: Option<String>,

    /// Users to invite; each gets a pending attendance
    #[serde(default)]
    pub attendees: Vec<Uuid>,
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = StatusError;

    fn try_from(request: CreateEventRequest) -> Result<Self, Self::Error> {
        let event_type = request
            .event_type
            .as_deref()
            .map(str::parse::<EventType>)
            .transpose()
            .or_400("Invalid event type")?
            .unwrap_or_default();

        Ok(NewEvent {
            uuid: request.uuid.unwrap_or_else(Uuid::now_v7).into(),
            team: request.team_uuid.map(Into::into),
            title: request.title,
            description: request.description,
            start_time: parse_timestamp(&request.start_time, "start_time")?,
            end_time: parse_timestamp(&request.end_time, "end_time")?,
            location: request.location,
            color: request.color,
            is_all_day: request.is_all_day,
            event_type,
            attendees: request.attendees.into_iter().map(Into::into).collect(),
        })
    }
}

/// Create Event Handler
#[endpoint(
    tags("events"),
    summary = "Create Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Event created"),
        (status_code = StatusCode::FORBIDDEN, description = "Not a member of this organization"),
        (status_code = StatusCode::NOT_FOUND, description = "Team not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    json: JsonBody<CreateEventRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EventDetailsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let event = state
        .app
        .calendar
        .create_event(
            user,
            organization.into_inner().into(),
            json.into_inner().try_into()?,
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/events/{}", event.event.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(event.into()))
}
