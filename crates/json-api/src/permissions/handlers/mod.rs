//! Permission Handlers

pub(crate) mod check;
