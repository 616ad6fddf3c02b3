//! Organization Members

mod handlers;

pub(crate) use handlers::*;
