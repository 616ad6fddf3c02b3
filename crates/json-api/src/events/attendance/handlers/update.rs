//! Update Attendance Handler

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

use worknest_app::domain::calendar::records::AttendeeResponse as Answer;

use crate::{
    events::{AttendeeResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Update Attendance Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateAttendanceRequest {
    /// `accepted` or `declined`
    pub status: String,
}

/// Update Attendance Handler
///
/// Answers an event invitation on behalf of the calling user.
#[endpoint(
    tags("events"),
    summary = "Respond to Event",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Attendance updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Event or attendance not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    event: PathParam<Uuid>,
    json: JsonBody<UpdateAttendanceRequest>,
    depot: &mut Depot,
) -> Result<Json<AttendeeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let answer = json
        .into_inner()
        .status
        .parse::<Answer>()
        .or_400("Invalid attendance status")?;

    let attendee = state
        .app
        .calendar
        .update_attendee_status(user, event.into_inner().into(), answer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(attendee.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use worknest_app::domain::calendar::{
        CalendarServiceError, MockCalendarService,
        records::{AttendeeRecord, AttendeeStatus, AttendeeUuid, EventUuid},
    };

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user_summary, service};

    use super::*;

    fn make_service(calendar: MockCalendarService) -> Service {
        service(
            Mocks {
                calendar,
                ..Mocks::default()
            },
            Router::with_path("events/{event}/attendance").put(handler),
        )
    }

    #[tokio::test]
    async fn test_accept_event() -> TestResult {
        let uuid = EventUuid::new();

        let mut calendar = MockCalendarService::new();

        calendar
            .expect_update_attendee_status()
            .once()
            .withf(move |user, event, answer| {
                *user == TEST_USER_UUID && *event == uuid && *answer == Answer::Accepted
            })
            .return_once(move |_, _, _| {
                Ok(AttendeeRecord {
                    uuid: AttendeeUuid::new(),
                    event_uuid: uuid,
                    user: make_user_summary(TEST_USER_UUID),
                    status: AttendeeStatus::Accepted,
                    added_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::put(format!("http://example.com/events/{uuid}/attendance"))
            .json(&json!({ "status": "accepted" }))
            .send(&make_service(calendar))
            .await;

        let body: AttendeeResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "accepted");

        Ok(())
    }

    #[tokio::test]
    async fn test_pending_is_not_an_answer() -> TestResult {
        let uuid = EventUuid::new();

        let res = TestClient::put(format!("http://example.com/events/{uuid}/attendance"))
            .json(&json!({ "status": "pending" }))
            .send(&make_service(MockCalendarService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_uninvited_user_returns_404() -> TestResult {
        let uuid = EventUuid::new();

        let mut calendar = MockCalendarService::new();

        calendar
            .expect_update_attendee_status()
            .once()
            .return_once(|_, _, _| Err(CalendarServiceError::AttendeeNotFound));

        let res = TestClient::put(format!("http://example.com/events/{uuid}/attendance"))
            .json(&json!({ "status": "declined" }))
            .send(&make_service(calendar))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
