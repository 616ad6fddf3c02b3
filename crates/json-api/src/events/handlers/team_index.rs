//! Team Event Index Handler

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

/// Team Event Index Handler
///
/// A team's events overlapping the `from`/`to` window, by start time.
#[endpoint(
    tags("events"),
    summary = "List Team Events",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    team: PathParam<Uuid>,
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
        .list_team_events(user, team.into_inner().into(), range)
        .await
        .map_err(into_status_error)?;

    Ok(Json(events.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use worknest_app::domain::{
        calendar::{CalendarServiceError, MockCalendarService},
        teams::records::TeamUuid,
    };

    use crate::test_helpers::{Mocks, service};

    use super::*;

    #[tokio::test]
    async fn test_unknown_team_returns_404() -> TestResult {
        let team = TeamUuid::new();

        let mut calendar = MockCalendarService::new();

        calendar
            .expect_list_team_events()
            .once()
            .withf(move |_, t, _| *t == team)
            .return_once(|_, _, _| Err(CalendarServiceError::TeamNotFound));

        let res = TestClient::get(format!("http://example.com/teams/{team}/events"))
            .send(&service(
                Mocks {
                    calendar,
                    ..Mocks::default()
                },
                Router::with_path("teams/{team}/events").get(handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
