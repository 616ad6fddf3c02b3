//! Tasks

pub(crate) mod comments;
pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
