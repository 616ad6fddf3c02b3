//! Team Members

mod handlers;

pub(crate) use handlers::*;
