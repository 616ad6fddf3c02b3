//! Event Attendance Handlers

pub(crate) mod update;
