//! All Events Handler

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

/// All Events Handler
///
/// Every event in the organization, team events included, by start time.
#[endpoint(
    tags("events"),
    summary = "List All Events",
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
        .list_all_events_for_user(user, organization.into_inner().into(), range)
        .await
        .map_err(into_status_error)?;

    Ok(Json(events.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::{
        calendar::{MockCalendarService, records::EventUuid},
        organizations::records::OrganizationUuid,
        teams::records::TeamUuid,
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_event_summary, service};

    use super::*;

    #[tokio::test]
    async fn test_all_includes_team_events() -> TestResult {
        let organization = OrganizationUuid::new();
        let team = TeamUuid::new();

        let mut calendar = MockCalendarService::new();

        calendar
            .expect_list_all_events_for_user()
            .once()
            .withf(move |user, org, _| *user == TEST_USER_UUID && *org == organization)
            .return_once(move |_, _, _| {
                let mut listed = make_event_summary(EventUuid::new());

                listed.event.team_uuid = Some(team);

                Ok(vec![make_event_summary(EventUuid::new()), listed])
            });

        let mut res = TestClient::get(format!(
            "http://example.com/organizations/{organization}/events/all"
        ))
        .send(&service(
            Mocks {
                calendar,
                ..Mocks::default()
            },
            Router::with_path("organizations/{organization}/events/all").get(handler),
        ))
        .await;

        let body: EventsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.events.len(), 2);
        assert_eq!(
            body.events.get(1).and_then(|listed| listed.event.team_uuid),
            Some(team.into_uuid())
        );

        Ok(())
    }
}
