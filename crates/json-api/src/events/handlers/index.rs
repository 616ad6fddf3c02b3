//! Organization Event Index Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    events::{EventsResponse, errors::into_status_error, event_range},
    extensions::*,
    state::State,
};

/// Organization Event Index Handler
///
/// Organization-wide events overlapping the `from`/`to` window, by start time.
#[endpoint(
    tags("events"),
    summary = "List Organization Events",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    organization: PathParam<Uuid>,
    from: QueryParam<String, false>,
    to: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<EventsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let range = event_range(from, to)?;

    let events = state
        .app
        .calendar
        .list_organization_events(user, organization.into_inner().into(), range)
        .await
        .map_err(into_status_error)?;

    Ok(Json(events.into()))
}
