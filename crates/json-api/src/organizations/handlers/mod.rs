//! Organization Handlers

pub(crate) mod create;
pub(crate) mod current;
pub(crate) mod get;
pub(crate) mod index;
