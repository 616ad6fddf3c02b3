//! Calendar Events

pub(crate) mod attendance;
pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
