//! Recruitment
//!
//! Candidates are invited by email and complete their application through an
//! unguessable token, without an account. Reviewers then move the candidate
//! through the review states.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::RecruitmentServiceError;
pub use service::*;
