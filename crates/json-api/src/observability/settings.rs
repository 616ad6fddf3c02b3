//! Request-path settings fixed at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    /// Requests slower than this are logged at `warn`.
    pub(super) slow_request_threshold: Duration,

    /// Continue incoming `traceparent` headers instead of starting new traces.
    pub(super) propagate_parent: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            propagate_parent: false,
        }
    }
}

impl From<&ObservabilityConfig> for RequestSettings {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            propagate_parent: config.otel_enabled && config.otel_parent_propagation_enabled,
        }
    }
}

static REQUEST_SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

/// First call wins; later calls are ignored.
pub(super) fn apply_runtime_config(config: &ObservabilityConfig) {
    _ = REQUEST_SETTINGS.set(RequestSettings::from(config));
}

pub(super) fn request_settings() -> RequestSettings {
    REQUEST_SETTINGS.get().copied().unwrap_or_default()
}
