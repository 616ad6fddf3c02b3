//! Candidate Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::recruitment::records::{CandidateDocumentRecord, CandidateRecord};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CandidateResponse {
    pub uuid: Uuid,
    pub organization_uuid: Uuid,
    pub email: String,
    pub position: Option<String>,

    /// Application token to hand to the candidate
    pub token: Uuid,

    /// `invited`, `submitted`, `reviewing`, `approved` or `rejected`
    pub status: String,

    pub name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub invited_by: Uuid,
    pub invited_at: String,
    pub expires_at: String,
    pub submitted_at: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<String>,
}

impl From<CandidateRecord> for CandidateResponse {
    fn from(candidate: CandidateRecord) -> Self {
        CandidateResponse {
            uuid: candidate.uuid.into(),
            organization_uuid: candidate.organization_uuid.into(),
            email: candidate.email,
            position: candidate.position,
            token: candidate.token.into(),
            status: candidate.status.to_string(),
            name: candidate.name,
            phone: candidate.phone,
            date_of_birth: candidate.date_of_birth.map(|date| date.to_string()),
            address: candidate.address,
            notes: candidate.notes,
            invited_by: candidate.invited_by.into(),
            invited_at: candidate.invited_at.to_string(),
            expires_at: candidate.expires_at.to_string(),
            submitted_at: candidate.submitted_at.map(|at| at.to_string()),
            reviewed_by: candidate.reviewed_by.map(Into::into),
            reviewed_at: candidate.reviewed_at.map(|at| at.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CandidatesResponse {
    pub candidates: Vec<CandidateResponse>,
}

impl From<Vec<CandidateRecord>> for CandidatesResponse {
    fn from(candidates: Vec<CandidateRecord>) -> Self {
        CandidatesResponse {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CandidateDocumentResponse {
    pub uuid: Uuid,
    pub candidate_uuid: Uuid,

    /// `resume`, `noc`, `certificate` or `other`
    pub document_type: String,

    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub uploaded_at: String,
}

impl From<CandidateDocumentRecord> for CandidateDocumentResponse {
    fn from(document: CandidateDocumentRecord) -> Self {
        CandidateDocumentResponse {
            uuid: document.uuid.into(),
            candidate_uuid: document.candidate_uuid.into(),
            document_type: document.document_type.to_string(),
            file_name: document.file_name,
            file_url: document.file_url,
            file_size: document.file_size,
            uploaded_at: document.uploaded_at.to_string(),
        }
    }
}
