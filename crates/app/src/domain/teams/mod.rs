//! Teams

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::TeamsServiceError;
pub use service::*;
