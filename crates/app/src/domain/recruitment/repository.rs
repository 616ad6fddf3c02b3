//! Recruitment Repository

use jiff::Timestamp;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{decode_optional_timestamp, decode_text, decode_timestamp},
    domain::{
        organizations::records::OrganizationUuid,
        recruitment::{
            data::{CandidateSubmission, NewCandidateDocument},
            records::{
                ApplicationRecord, CandidateDocumentRecord, CandidateDocumentUuid,
                CandidateRecord, CandidateStatus, CandidateToken, CandidateUuid,
            },
        },
        users::records::UserUuid,
    },
};

const CREATE_CANDIDATE_SQL: &str = include_str!("sql/create_candidate.sql");
const GET_CANDIDATE_SQL: &str = include_str!("sql/get_candidate.sql");
const LOCK_CANDIDATE_SQL: &str = include_str!("sql/lock_candidate.sql");
const FIND_CANDIDATE_BY_TOKEN_SQL: &str = include_str!("sql/find_candidate_by_token.sql");
const FIND_APPLICATION_SQL: &str = include_str!("sql/find_application.sql");
const LIST_ORGANIZATION_CANDIDATES_SQL: &str =
    include_str!("sql/list_organization_candidates.sql");
const SUBMIT_CANDIDATE_SQL: &str = include_str!("sql/submit_candidate.sql");
const UPDATE_CANDIDATE_STATUS_SQL: &str = include_str!("sql/update_candidate_status.sql");
const CREATE_DOCUMENT_SQL: &str = include_str!("sql/create_document.sql");
const LIST_DOCUMENTS_SQL: &str = include_str!("sql/list_documents.sql");

/// Fields written when a candidate is invited.
#[derive(Debug)]
pub(crate) struct CandidateInvite<'a> {
    pub(crate) organization: OrganizationUuid,
    pub(crate) email: &'a str,
    pub(crate) position: Option<&'a str>,
    pub(crate) token: CandidateToken,
    pub(crate) invited_by: UserUuid,
    pub(crate) expires_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgRecruitmentRepository;

impl PgRecruitmentRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        invite: &CandidateInvite<'_>,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(CREATE_CANDIDATE_SQL)
            .bind(CandidateUuid::new().into_uuid())
            .bind(invite.organization.into_uuid())
            .bind(invite.email)
            .bind(invite.position)
            .bind(invite.token.into_uuid())
            .bind(invite.invited_by.into_uuid())
            .bind(SqlxTimestamp::from(invite.expires_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(GET_CANDIDATE_SQL)
            .bind(candidate.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Fetch a candidate and hold a row lock until the transaction ends.
    pub(crate) async fn lock_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(LOCK_CANDIDATE_SQL)
            .bind(candidate.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_candidate_by_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: CandidateToken,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(FIND_CANDIDATE_BY_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_application(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token: CandidateToken,
    ) -> Result<ApplicationRecord, sqlx::Error> {
        query_as::<Postgres, ApplicationRecord>(FIND_APPLICATION_SQL)
            .bind(token.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_organization_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        organization: OrganizationUuid,
    ) -> Result<Vec<CandidateRecord>, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(LIST_ORGANIZATION_CANDIDATES_SQL)
            .bind(organization.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Store the submission if the candidate is still `invited`.
    ///
    /// Returns `None` when another submission got there first.
    pub(crate) async fn submit_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
        submission: &CandidateSubmission,
        submitted_at: Timestamp,
    ) -> Result<Option<CandidateRecord>, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(SUBMIT_CANDIDATE_SQL)
            .bind(candidate.into_uuid())
            .bind(&submission.name)
            .bind(&submission.phone)
            .bind(SqlxDate::from(submission.date_of_birth))
            .bind(&submission.address)
            .bind(SqlxTimestamp::from(submitted_at))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_candidate_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
        status: CandidateStatus,
        notes: Option<&str>,
        reviewed_by: UserUuid,
        reviewed_at: Timestamp,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(UPDATE_CANDIDATE_STATUS_SQL)
            .bind(candidate.into_uuid())
            .bind(status.as_str())
            .bind(notes)
            .bind(reviewed_by.into_uuid())
            .bind(SqlxTimestamp::from(reviewed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_document(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
        document: &NewCandidateDocument,
    ) -> Result<CandidateDocumentRecord, sqlx::Error> {
        query_as::<Postgres, CandidateDocumentRecord>(CREATE_DOCUMENT_SQL)
            .bind(CandidateDocumentUuid::new().into_uuid())
            .bind(candidate.into_uuid())
            .bind(document.document_type.as_str())
            .bind(&document.file_name)
            .bind(&document.file_url)
            .bind(document.file_size)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_documents(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
    ) -> Result<Vec<CandidateDocumentRecord>, sqlx::Error> {
        query_as::<Postgres, CandidateDocumentRecord>(LIST_DOCUMENTS_SQL)
            .bind(candidate.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CandidateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CandidateUuid::from_uuid(row.try_get("uuid")?),
            organization_uuid: OrganizationUuid::from_uuid(row.try_get("organization_uuid")?),
            email: row.try_get("email")?,
            position: row.try_get("position")?,
            token: CandidateToken::from_uuid(row.try_get("token")?),
            status: decode_text(row, "status")?,
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            date_of_birth: row
                .try_get::<Option<SqlxDate>, _>("date_of_birth")?
                .map(SqlxDate::to_jiff),
            address: row.try_get("address")?,
            notes: row.try_get("notes")?,
            invited_by: UserUuid::from_uuid(row.try_get("invited_by")?),
            invited_at: decode_timestamp(row, "invited_at")?,
            expires_at: decode_timestamp(row, "expires_at")?,
            submitted_at: decode_optional_timestamp(row, "submitted_at")?,
            reviewed_by: row
                .try_get::<Option<Uuid>, _>("reviewed_by")?
                .map(UserUuid::from_uuid),
            reviewed_at: decode_optional_timestamp(row, "reviewed_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CandidateDocumentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CandidateDocumentUuid::from_uuid(row.try_get("uuid")?),
            candidate_uuid: CandidateUuid::from_uuid(row.try_get("candidate_uuid")?),
            document_type: decode_text(row, "document_type")?,
            file_name: row.try_get("file_name")?,
            file_url: row.try_get("file_url")?,
            file_size: row.try_get("file_size")?,
            uploaded_at: decode_timestamp(row, "uploaded_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApplicationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            candidate_uuid: CandidateUuid::from_uuid(row.try_get("uuid")?),
            organization_name: row.try_get("organization_name")?,
            email: row.try_get("email")?,
            position: row.try_get("position")?,
            status: decode_text(row, "status")?,
            expires_at: decode_timestamp(row, "expires_at")?,
            submitted_at: decode_optional_timestamp(row, "submitted_at")?,
        })
    }
}
