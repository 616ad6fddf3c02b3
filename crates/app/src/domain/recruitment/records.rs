//! Candidate Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{Timestamp, civil::Date};

use crate::{
    domain::{UnknownVariant, organizations::records::OrganizationUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Candidate UUID
pub type CandidateUuid = TypedUuid<CandidateRecord>;

/// Candidate Document UUID
pub type CandidateDocumentUuid = TypedUuid<CandidateDocumentRecord>;

/// Marker for application tokens.
#[derive(Debug)]
pub struct Application;

/// Bearer credential an applicant uses to reach their application.
pub type CandidateToken = TypedUuid<Application>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CandidateStatus {
    #[default]
    Invited,
    Submitted,
    Reviewing,
    Approved,
    Rejected,
}

impl CandidateStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invited => "invited",
            Self::Submitted => "submitted",
            Self::Reviewing => "reviewing",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a reviewer may move a candidate from `self` to `next`.
    ///
    /// `invited` only advances through the applicant's own submission.
    #[must_use]
    pub const fn can_review_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                Self::Submitted,
                Self::Reviewing | Self::Approved | Self::Rejected
            ) | (Self::Reviewing, Self::Approved | Self::Rejected)
        )
    }
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "invited" => Ok(Self::Invited),
            "submitted" => Ok(Self::Submitted),
            "reviewing" => Ok(Self::Reviewing),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownVariant::new("candidate status", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentType {
    Resume,

    /// No-objection certificate.
    Noc,

    Certificate,
    Other,
}

impl DocumentType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Noc => "noc",
            Self::Certificate => "certificate",
            Self::Other => "other",
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "resume" => Ok(Self::Resume),
            "noc" => Ok(Self::Noc),
            "certificate" => Ok(Self::Certificate),
            "other" => Ok(Self::Other),
            _ => Err(UnknownVariant::new("document type", value)),
        }
    }
}

/// Candidate Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    pub uuid: CandidateUuid,
    pub organization_uuid: OrganizationUuid,
    pub email: String,
    pub position: Option<String>,
    pub token: CandidateToken,
    pub status: CandidateStatus,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<Date>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub invited_by: UserUuid,
    pub invited_at: Timestamp,
    pub expires_at: Timestamp,
    pub submitted_at: Option<Timestamp>,
    pub reviewed_by: Option<UserUuid>,
    pub reviewed_at: Option<Timestamp>,
}

impl CandidateRecord {
    /// Tokens stop working once `now` reaches `expires_at`.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Candidate Document Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDocumentRecord {
    pub uuid: CandidateDocumentUuid,
    pub candidate_uuid: CandidateUuid,
    pub document_type: DocumentType,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub uploaded_at: Timestamp,
}

/// A candidate with their uploaded documents, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDetailsRecord {
    pub candidate: CandidateRecord,
    pub documents: Vec<CandidateDocumentRecord>,
}

/// What an applicant sees through their token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
    pub candidate_uuid: CandidateUuid,
    pub organization_name: String,
    pub email: String,
    pub position: Option<String>,
    pub status: CandidateStatus,
    pub expires_at: Timestamp,
    pub submitted_at: Option<Timestamp>,
}
