//! State

use std::sync::Arc;

use worknest_app::context::AppContext;

/// Shared request state: every domain service behind the app context.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
