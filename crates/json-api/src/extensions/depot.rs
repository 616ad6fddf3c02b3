//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use worknest_app::domain::users::records::UserUuid;

const CURRENT_USER_DEPOT_KEY: &str = "current_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the user resolved from the bearer token.
    fn insert_current_user(&mut self, user: UserUuid);

    /// The authenticated user, or `401` when the auth middleware did not run.
    fn current_user_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: UserUuid) {
        self.insert(CURRENT_USER_DEPOT_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(CURRENT_USER_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Unauthorized"))
    }
}
