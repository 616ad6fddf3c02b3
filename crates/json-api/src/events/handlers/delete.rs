//! Delete Event Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{events::errors::into_status_error, extensions::*, state::State};

/// Delete Event Handler
#[endpoint(
    tags("events"),
    summary = "Delete Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Event deleted"),
        (status_code = StatusCode::FORBIDDEN, description = "Only the creator or an admin can delete this event"),
        (status_code = StatusCode::NOT_FOUND, description = "Event not found"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .calendar
        .delete_event(user, event.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
