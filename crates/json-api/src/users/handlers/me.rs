//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::users::records::{UserRecord, UserSummary};

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,

    /// The date and time the user was created
    pub created_at: String,

    /// The date and time the user was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// A user referenced from another resource.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserSummaryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(user: UserSummary) -> Self {
        UserSummaryResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
        }
    }
}

/// Current User Handler
///
/// Returns the authenticated user.
#[endpoint(
    tags("users"),
    summary = "Get Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Current user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let user = state
        .app
        .users
        .get_user(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use worknest_app::domain::users::{MockUsersService, UsersServiceError};

    use crate::test_helpers::{Mocks, TEST_USER_UUID, public_service, service};

    use super::*;

    fn route() -> Router {
        Router::with_path("me").get(handler)
    }

    #[tokio::test]
    async fn test_me_returns_current_user() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .withf(|uuid| *uuid == TEST_USER_UUID)
            .return_once(|uuid| {
                Ok(UserRecord {
                    uuid,
                    name: "Ann".to_string(),
                    email: "ann@example.com".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::get("http://example.com/me")
            .send(&service(
                Mocks {
                    users,
                    ..Mocks::default()
                },
                route(),
            ))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, TEST_USER_UUID.into_uuid());
        assert_eq!(body.email, "ann@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_me_deleted_user_returns_404() -> TestResult {
        let mut users = MockUsersService::new();

        users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get("http://example.com/me")
            .send(&service(
                Mocks {
                    users,
                    ..Mocks::default()
                },
                route(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_me_without_user_returns_401() -> TestResult {
        let res = TestClient::get("http://example.com/me")
            .send(&public_service(Mocks::default(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
