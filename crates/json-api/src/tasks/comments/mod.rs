//! Task Comments

mod handlers;

pub(crate) use handlers::*;
