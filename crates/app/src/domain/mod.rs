//! WorkNest Domain Concerns

use thiserror::Error;

pub mod calendar;
pub mod invitations;
pub mod members;
pub mod organizations;
pub mod permissions;
pub mod recruitment;
pub mod tasks;
pub mod teams;
pub mod users;

/// Raised when a stored or submitted value does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Trim a required text input, returning `None` when nothing remains.
pub(crate) fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim an optional text input, collapsing blank values to `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(required_text)
}
