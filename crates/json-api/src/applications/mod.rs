//! Candidate Applications
//!
//! Public routes used by invited candidates. The application token in the
//! path is the only credential.

mod handlers;

pub(crate) use handlers::*;
