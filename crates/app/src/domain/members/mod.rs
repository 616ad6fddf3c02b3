//! Organization Members

pub mod records;
pub(crate) mod repository;
