//! Recruitment Data

use jiff::{SignedDuration, civil::Date};

use crate::domain::recruitment::records::DocumentType;

/// How long an application token stays usable.
pub const CANDIDATE_TTL: SignedDuration = SignedDuration::from_hours(14 * 24);

/// New Candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
    pub email: String,
    pub position: Option<String>,
}

/// Personal details an applicant submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSubmission {
    pub name: String,
    pub phone: String,
    pub date_of_birth: Date,
    pub address: String,
}

/// Metadata of a document stored elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidateDocument {
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
}
