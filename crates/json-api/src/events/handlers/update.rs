//! Update Event Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::calendar::{data::EventUpdate, records::EventType};

use crate::{
    events::{EventResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Event Request
///
/// Omitted fields are left untouched.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub start_time: Option<String>,

    #[serde(default)]
    pub end_time: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub is_all_day: Option<bool>,

    #[serde(default)]
    pub event_type: Option<String>,
}

impl TryFrom<UpdateEventRequest> for EventUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateEventRequest) -> Result<Self, Self::Error> {
        let event_type = request
            .event_type
            .as_deref()
            .map(str::parse::<EventType>)
            .transpose()
            .or_400("Invalid event type")?;

        Ok(EventUpdate {
            title: request.title,
            description: request.description,
            start_time: request
                .start_time
                .as_deref()
                .map(|value| parse_timestamp(value, "start_time"))
                .transpose()?,
            end_time: request
                .end_time
                .as_deref()
                .map(|value| parse_timestamp(value, "end_time"))
                .transpose()?,
            location: request.location,
            color: request.color,
            is_all_day: request.is_all_day,
            event_type,
        })
    }
}

/// Update Event Handler
#[endpoint(
    tags("events"),
    summary = "Update Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Event updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the creator or an admin can update this event"),
        (status_code = StatusCode::NOT_FOUND, description = "Event not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    json: JsonBody<UpdateEventRequest>,
    depot: &mut Depot,
) -> Result<Json<EventResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let event = state
        .app
        .calendar
        .update_event(user, event.into_inner().into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    Ok(Json(event.into()))
}
