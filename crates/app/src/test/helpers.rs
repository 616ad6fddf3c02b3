//! Test Helpers

use uuid::Uuid;

use crate::{
    domain::{invitations::records::InvitationUuid, recruitment::records::CandidateUuid},
    test::TestContext,
};

async fn backdate_expiry(ctx: &TestContext, table: &str, uuid: Uuid) {
    sqlx::query(&format!(
        "UPDATE {table} SET expires_at = now() - interval '1 hour' WHERE uuid = $1"
    ))
    .bind(uuid)
    .execute(ctx.db.pool())
    .await
    .expect("Failed to backdate expiry");
}

/// Move an invitation's expiry into the past.
pub(crate) async fn expire_invitation(ctx: &TestContext, invitation: InvitationUuid) {
    backdate_expiry(ctx, "invitations", invitation.into_uuid()).await;
}

/// Move a candidate's application window into the past.
pub(crate) async fn expire_candidate(ctx: &TestContext, candidate: CandidateUuid) {
    backdate_expiry(ctx, "candidates", candidate.into_uuid()).await;
}
