//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info, warn};

use crate::{
    auth::{
        AuthServiceError, IssuedSession, NewSession, SessionRecord, SessionTokenVersion,
        SessionUuid, format_session_token, generate_session_secret, hash_session_token,
        parse_session_token, repository::PgAuthRepository, session_hash_matches,
    },
    database::Db,
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new session for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the insert fails.
    pub async fn issue_session(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedSession, AuthServiceError> {
        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid.into_uuid(), version, &secret);
        let token_hash = hash_session_token(&session_uuid.into_uuid(), version, user, &secret);

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(session = %session.uuid, user = %user, "session issued");

        Ok(IssuedSession { token, session })
    }

    /// List every session of the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sessions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<SessionRecord>, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let sessions = self.repository.list_user_sessions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(sessions)
    }

    /// Revoke a session. Returns `true` if the session was still active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_session(&self, session: SessionUuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_session(&mut tx, session).await?;

        tx.commit().await?;

        if revoked.is_some() {
            info!(session = %session, "session revoked");
        }

        Ok(revoked.is_some())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed bearer token");
            AuthServiceError::NotFound
        })?;

        let session_uuid = SessionUuid::from_uuid(parsed.session_uuid);

        let mut tx = self.db.begin().await?;

        let session = self
            .repository
            .find_active_session(&mut tx, session_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let token_hash = hash_session_token(
            &parsed.session_uuid,
            parsed.version,
            session.user_uuid,
            &parsed.secret,
        );

        if session.version != parsed.version
            || !session_hash_matches(&session.token_hash, &token_hash)
        {
            return Err(AuthServiceError::NotFound);
        }

        // last_used_at is best-effort
        if let Err(error) = self.repository.touch_session(&mut tx, session_uuid).await {
            warn!(%error, session = %session_uuid, "failed to record session use");
        }

        if let Err(error) = tx.commit().await {
            warn!(%error, session = %session_uuid, "failed to record session use");
        }

        Ok(session.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user owning its session.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_tokens_authenticate_their_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", "ada@example.com").await;

        let issued = ctx.auth.issue_session(user, None).await?;

        assert!(issued.token.starts_with("wn_v1_"));
        assert_eq!(ctx.auth.authenticate_bearer(&issued.token).await?, user);

        let sessions = ctx.auth.list_sessions(user).await?;

        assert_eq!(sessions.len(), 1);
        assert!(
            sessions.first().and_then(|s| s.last_used_at).is_some(),
            "expected authentication to record last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secrets_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", "ada@example.com").await;

        let issued = ctx.auth.issue_session(user, None).await?;

        let (id, secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let rest = secret.get(1..).ok_or("secret is empty")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{rest}");

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn malformed_tokens_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_sessions_no_longer_authenticate() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", "ada@example.com").await;

        let issued = ctx.auth.issue_session(user, None).await?;

        assert!(ctx.auth.revoke_session(issued.session.uuid).await?);
        assert!(
            !ctx.auth.revoke_session(issued.session.uuid).await?,
            "second revoke should be a no-op"
        );

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn expired_sessions_no_longer_authenticate() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", "ada@example.com").await;

        let expires_at = Timestamp::now() - SignedDuration::from_hours(1);
        let issued = ctx.auth.issue_session(user, Some(expires_at)).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_session(UserUuid::new(), None).await;

        assert!(matches!(result, Err(AuthServiceError::UserNotFound)));

        Ok(())
    }
}
