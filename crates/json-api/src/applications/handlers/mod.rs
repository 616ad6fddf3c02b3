//! Application Handlers

pub(crate) mod documents;
pub(crate) mod get;
pub(crate) mod submit;
