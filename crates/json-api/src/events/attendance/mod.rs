//! Event Attendance

mod handlers;

pub(crate) use handlers::*;
