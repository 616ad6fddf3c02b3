//! Invitation Handlers

pub(crate) mod accept;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod mine;
