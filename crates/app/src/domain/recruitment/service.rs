//! Recruitment service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        members::{records::MemberRole, repository::PgMembersRepository},
        optional_text,
        organizations::records::OrganizationUuid,
        permissions::authorize_or,
        recruitment::{
            data::{CANDIDATE_TTL, CandidateSubmission, NewCandidate, NewCandidateDocument},
            errors::RecruitmentServiceError,
            records::{
                ApplicationRecord, CandidateDetailsRecord, CandidateDocumentRecord,
                CandidateRecord, CandidateStatus, CandidateToken, CandidateUuid,
            },
            repository::{CandidateInvite, PgRecruitmentRepository},
        },
        required_text,
        users::{
            data::{looks_like_email, normalise_email},
            records::UserUuid,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgRecruitmentService {
    db: Db,
    repository: PgRecruitmentRepository,
    members: PgMembersRepository,
}

impl PgRecruitmentService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgRecruitmentRepository::new(),
            members: PgMembersRepository::new(),
        }
    }
}

#[async_trait]
impl RecruitmentService for PgRecruitmentService {
    async fn invite_candidate(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        candidate: NewCandidate,
    ) -> Result<CandidateRecord, RecruitmentServiceError> {
        let mut tx = self.db.begin().await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
            RecruitmentServiceError::ManageForbidden,
        )?;

        let email = normalise_email(&candidate.email);

        if !looks_like_email(&email) {
            return Err(RecruitmentServiceError::InvalidEmail);
        }

        let position = optional_text(candidate.position);

        let created = self
            .repository
            .create_candidate(
                &mut tx,
                &CandidateInvite {
                    organization,
                    email: &email,
                    position: position.as_deref(),
                    token: CandidateToken::from_uuid(Uuid::new_v4()),
                    invited_by: user,
                    expires_at: Timestamp::now() + CANDIDATE_TTL,
                },
            )
            .await?;

        tx.commit().await?;

        // Delivery of the application link happens outside this service.
        info!(
            organization = %organization,
            candidate = %created.uuid,
            expires_at = %created.expires_at,
            "candidate invited"
        );

        Ok(created)
    }

    async fn list_organization_candidates(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<CandidateRecord>, RecruitmentServiceError> {
        let mut tx = self.db.begin().await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, organization)
                .await?,
            MemberRole::PRIVILEGED,
            RecruitmentServiceError::ManageForbidden,
        )?;

        let candidates = self
            .repository
            .list_organization_candidates(&mut tx, organization)
            .await?;

        tx.commit().await?;

        Ok(candidates)
    }

    async fn get_candidate(
        &self,
        user: UserUuid,
        candidate: CandidateUuid,
    ) -> Result<CandidateDetailsRecord, RecruitmentServiceError> {
        let mut tx = self.db.begin().await?;

        let candidate = self.repository.get_candidate(&mut tx, candidate).await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, candidate.organization_uuid)
                .await?,
            MemberRole::PRIVILEGED,
            RecruitmentServiceError::ManageForbidden,
        )?;

        let documents = self.repository.list_documents(&mut tx, candidate.uuid).await?;

        tx.commit().await?;

        Ok(CandidateDetailsRecord {
            candidate,
            documents,
        })
    }

    async fn get_candidate_by_token(
        &self,
        token: CandidateToken,
    ) -> Result<ApplicationRecord, RecruitmentServiceError> {
        let mut tx = self.db.begin().await?;

        let application = self
            .repository
            .find_application(&mut tx, token)
            .await
            .map_err(|error| {
                RecruitmentServiceError::from_token_lookup(
                    error,
                    RecruitmentServiceError::UnknownToken,
                )
            })?;

        tx.commit().await?;

        if Timestamp::now() >= application.expires_at {
            return Err(RecruitmentServiceError::Expired);
        }

        Ok(application)
    }

    async fn submit_candidate_info(
        &self,
        token: CandidateToken,
        submission: CandidateSubmission,
    ) -> Result<CandidateRecord, RecruitmentServiceError> {
        let (Some(name), Some(phone), Some(address)) = (
            required_text(&submission.name),
            required_text(&submission.phone),
            required_text(&submission.address),
        ) else {
            return Err(RecruitmentServiceError::MissingRequiredData);
        };

        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let candidate = self
            .repository
            .find_candidate_by_token(&mut tx, token)
            .await
            .map_err(|error| {
                RecruitmentServiceError::from_token_lookup(
                    error,
                    RecruitmentServiceError::InvalidInvitation,
                )
            })?;

        if candidate.is_expired_at(now) {
            return Err(RecruitmentServiceError::Expired);
        }

        if candidate.status != CandidateStatus::Invited {
            return Err(RecruitmentServiceError::AlreadySubmitted);
        }

        let submitted = self
            .repository
            .submit_candidate(
                &mut tx,
                candidate.uuid,
                &CandidateSubmission {
                    name,
                    phone,
                    date_of_birth: submission.date_of_birth,
                    address,
                },
                now,
            )
            .await?
            .ok_or(RecruitmentServiceError::AlreadySubmitted)?;

        tx.commit().await?;

        info!(
            organization = %submitted.organization_uuid,
            candidate = %submitted.uuid,
            "candidate application submitted"
        );

        Ok(submitted)
    }

    async fn upload_candidate_document(
        &self,
        token: CandidateToken,
        document: NewCandidateDocument,
    ) -> Result<CandidateDocumentRecord, RecruitmentServiceError> {
        let (Some(file_name), Some(file_url)) = (
            required_text(&document.file_name),
            required_text(&document.file_url),
        ) else {
            return Err(RecruitmentServiceError::InvalidDocument);
        };

        if document.file_size < 0 {
            return Err(RecruitmentServiceError::InvalidDocument);
        }

        let mut tx = self.db.begin().await?;

        let candidate = self
            .repository
            .find_candidate_by_token(&mut tx, token)
            .await
            .map_err(|error| {
                RecruitmentServiceError::from_token_lookup(
                    error,
                    RecruitmentServiceError::InvalidInvitation,
                )
            })?;

        if candidate.is_expired_at(Timestamp::now()) {
            return Err(RecruitmentServiceError::Expired);
        }

        let created = self
            .repository
            .create_document(
                &mut tx,
                candidate.uuid,
                &NewCandidateDocument {
                    file_name,
                    file_url,
                    ..document
                },
            )
            .await?;

        tx.commit().await?;

        info!(
            candidate = %candidate.uuid,
            document_type = %created.document_type,
            "candidate document uploaded"
        );

        Ok(created)
    }

    async fn update_candidate_status(
        &self,
        user: UserUuid,
        candidate: CandidateUuid,
        status: CandidateStatus,
        notes: Option<String>,
    ) -> Result<CandidateRecord, RecruitmentServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_candidate(&mut tx, candidate).await?;

        authorize_or(
            self.members
                .find_membership(&mut tx, user, current.organization_uuid)
                .await?,
            MemberRole::PRIVILEGED,
            RecruitmentServiceError::ManageForbidden,
        )?;

        if !current.status.can_review_to(status) {
            return Err(RecruitmentServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        let notes = optional_text(notes);

        let updated = self
            .repository
            .update_candidate_status(
                &mut tx,
                candidate,
                status,
                notes.as_deref(),
                user,
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        info!(
            candidate = %candidate,
            from = %current.status,
            to = %status,
            "candidate status updated"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait RecruitmentService: Send + Sync {
    /// Invites a candidate with a fresh token valid for [`CANDIDATE_TTL`].
    async fn invite_candidate(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
        candidate: NewCandidate,
    ) -> Result<CandidateRecord, RecruitmentServiceError>;

    /// Lists candidates, most recently invited first.
    async fn list_organization_candidates(
        &self,
        user: UserUuid,
        organization: OrganizationUuid,
    ) -> Result<Vec<CandidateRecord>, RecruitmentServiceError>;

    async fn get_candidate(
        &self,
        user: UserUuid,
        candidate: CandidateUuid,
    ) -> Result<CandidateDetailsRecord, RecruitmentServiceError>;

    /// Resolves an application token for the unauthenticated applicant.
    async fn get_candidate_by_token(
        &self,
        token: CandidateToken,
    ) -> Result<ApplicationRecord, RecruitmentServiceError>;

    /// Stores the applicant's details. Each token submits at most once.
    async fn submit_candidate_info(
        &self,
        token: CandidateToken,
        submission: CandidateSubmission,
    ) -> Result<CandidateRecord, RecruitmentServiceError>;

    async fn upload_candidate_document(
        &self,
        token: CandidateToken,
        document: NewCandidateDocument,
    ) -> Result<CandidateDocumentRecord, RecruitmentServiceError>;

    /// Moves a candidate along the review workflow.
    async fn update_candidate_status(
        &self,
        user: UserUuid,
        candidate: CandidateUuid,
        status: CandidateStatus,
        notes: Option<String>,
    ) -> Result<CandidateRecord, RecruitmentServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::{permissions::PermissionDenied, recruitment::records::DocumentType},
        test::{TestContext, helpers::expire_candidate},
    };

    use super::*;

    fn new_candidate(email: &str) -> NewCandidate {
        NewCandidate {
            email: email.to_string(),
            position: Some("Engineer".to_string()),
        }
    }

    fn submission() -> CandidateSubmission {
        CandidateSubmission {
            name: "Ada Lovelace".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            date_of_birth: date(1990, 12, 10),
            address: "12 St James's Square, London".to_string(),
        }
    }

    fn resume() -> NewCandidateDocument {
        NewCandidateDocument {
            document_type: DocumentType::Resume,
            file_name: "cv.pdf".to_string(),
            file_url: "https://files.example.com/cv.pdf".to_string(),
            file_size: 48_213,
        }
    }

    #[tokio::test]
    async fn invite_candidate_issues_fourteen_day_token() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let before = Timestamp::now();

        let candidate = ctx
            .recruitment
            .invite_candidate(owner, organization, new_candidate("Ada@Example.com"))
            .await?;

        let application = ctx
            .recruitment
            .get_candidate_by_token(candidate.token)
            .await?;

        assert_eq!(candidate.status, CandidateStatus::Invited);
        assert_eq!(candidate.email, "ada@example.com");
        assert!(candidate.expires_at >= before + CANDIDATE_TTL);
        assert_eq!(application.organization_name, "Acme");
        assert_eq!(application.candidate_uuid, candidate.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn outsider_with_invalid_email_is_rejected_as_non_member() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let outsider = ctx.create_user("Outsider", "outsider@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;

        let result = ctx
            .recruitment
            .invite_candidate(outsider, organization, new_candidate("not-an-email"))
            .await;

        assert!(
            matches!(
                result,
                Err(RecruitmentServiceError::Permission(
                    PermissionDenied::NotMember
                ))
            ),
            "expected NotMember, got {result:?}"
        );
    }

    #[tokio::test]
    async fn plain_member_cannot_invite_candidates() {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let member = ctx.create_user("Member", "member@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;

        ctx.add_member(organization, member, MemberRole::Member)
            .await;

        let result = ctx
            .recruitment
            .invite_candidate(member, organization, new_candidate("ada@example.com"))
            .await;

        assert!(
            matches!(result, Err(RecruitmentServiceError::ManageForbidden)),
            "expected ManageForbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let ctx = TestContext::new().await;
        let token = CandidateToken::from_uuid(Uuid::new_v4());

        let read = ctx.recruitment.get_candidate_by_token(token).await;
        let submit = ctx
            .recruitment
            .submit_candidate_info(token, submission())
            .await;

        assert!(
            matches!(read, Err(RecruitmentServiceError::UnknownToken)),
            "expected UnknownToken, got {read:?}"
        );
        assert!(
            matches!(submit, Err(RecruitmentServiceError::InvalidInvitation)),
            "expected InvalidInvitation, got {submit:?}"
        );
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let candidate = ctx
            .recruitment
            .invite_candidate(owner, organization, new_candidate("ada@example.com"))
            .await?;

        expire_candidate(&ctx, candidate.uuid).await;

        let read = ctx.recruitment.get_candidate_by_token(candidate.token).await;
        let submit = ctx
            .recruitment
            .submit_candidate_info(candidate.token, submission())
            .await;
        let upload = ctx
            .recruitment
            .upload_candidate_document(candidate.token, resume())
            .await;

        for result in [
            read.map(|_| ()),
            submit.map(|_| ()),
            upload.map(|_| ()),
        ] {
            assert!(
                matches!(result, Err(RecruitmentServiceError::Expired)),
                "expected Expired, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn token_submits_exactly_once() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let candidate = ctx
            .recruitment
            .invite_candidate(owner, organization, new_candidate("ada@example.com"))
            .await?;

        let (first, second) = tokio::join!(
            ctx.recruitment
                .submit_candidate_info(candidate.token, submission()),
            ctx.recruitment
                .submit_candidate_info(candidate.token, submission()),
        );

        let again = ctx
            .recruitment
            .submit_candidate_info(candidate.token, submission())
            .await;

        let submitted = [&first, &second]
            .into_iter()
            .filter_map(|result| result.as_ref().ok())
            .collect::<Vec<_>>();

        assert_eq!(submitted.len(), 1, "one submission wins: {first:?} / {second:?}");
        assert!(
            [&first, &second]
                .into_iter()
                .any(|result| matches!(result, Err(RecruitmentServiceError::AlreadySubmitted))),
            "the other submission is rejected"
        );
        assert!(
            matches!(again, Err(RecruitmentServiceError::AlreadySubmitted)),
            "expected AlreadySubmitted, got {again:?}"
        );

        let winner = submitted.first().ok_or("no submission won")?;

        assert_eq!(winner.status, CandidateStatus::Submitted);
        assert_eq!(winner.date_of_birth, Some(date(1990, 12, 10)));
        assert!(winner.submitted_at.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn reviewers_follow_the_status_workflow() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let candidate = ctx
            .recruitment
            .invite_candidate(owner, organization, new_candidate("ada@example.com"))
            .await?;

        let premature = ctx
            .recruitment
            .update_candidate_status(owner, candidate.uuid, CandidateStatus::Approved, None)
            .await;

        ctx.recruitment
            .submit_candidate_info(candidate.token, submission())
            .await?;

        let reviewing = ctx
            .recruitment
            .update_candidate_status(
                owner,
                candidate.uuid,
                CandidateStatus::Reviewing,
                Some("Strong portfolio".to_string()),
            )
            .await?;

        let approved = ctx
            .recruitment
            .update_candidate_status(owner, candidate.uuid, CandidateStatus::Approved, None)
            .await?;

        let reopened = ctx
            .recruitment
            .update_candidate_status(owner, candidate.uuid, CandidateStatus::Reviewing, None)
            .await;

        assert!(
            matches!(
                premature,
                Err(RecruitmentServiceError::InvalidTransition {
                    from: CandidateStatus::Invited,
                    to: CandidateStatus::Approved
                })
            ),
            "expected InvalidTransition, got {premature:?}"
        );
        assert_eq!(reviewing.reviewed_by, Some(owner));
        assert!(reviewing.reviewed_at.is_some());
        assert_eq!(approved.status, CandidateStatus::Approved);
        assert_eq!(
            approved.notes.as_deref(),
            Some("Strong portfolio"),
            "notes are kept when none are supplied"
        );
        assert!(
            matches!(reopened, Err(RecruitmentServiceError::InvalidTransition { .. })),
            "approved is terminal, got {reopened:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn documents_are_listed_with_the_candidate() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_user("Owner", "owner@example.com").await;
        let organization = ctx.create_organization(owner, "acme").await;
        let candidate = ctx
            .recruitment
            .invite_candidate(owner, organization, new_candidate("ada@example.com"))
            .await?;

        ctx.recruitment
            .upload_candidate_document(candidate.token, resume())
            .await?;

        let invalid = ctx
            .recruitment
            .upload_candidate_document(
                candidate.token,
                NewCandidateDocument {
                    file_size: -1,
                    ..resume()
                },
            )
            .await;

        let details = ctx.recruitment.get_candidate(owner, candidate.uuid).await?;
        let listed = ctx
            .recruitment
            .list_organization_candidates(owner, organization)
            .await?;

        assert!(
            matches!(invalid, Err(RecruitmentServiceError::InvalidDocument)),
            "expected InvalidDocument, got {invalid:?}"
        );
        assert_eq!(details.documents.len(), 1);
        assert_eq!(
            details.documents.first().map(|document| document.document_type),
            Some(DocumentType::Resume)
        );
        assert_eq!(listed.len(), 1);

        Ok(())
    }
}
