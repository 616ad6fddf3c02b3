//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        calendar::{CalendarService, PgCalendarService},
        invitations::{InvitationsService, PgInvitationsService},
        organizations::{OrganizationsService, PgOrganizationsService},
        permissions::{PermissionsService, PgPermissionsService},
        recruitment::{PgRecruitmentService, RecruitmentService},
        tasks::{PgTasksService, TasksService},
        teams::{PgTeamsService, TeamsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Service handles shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub permissions: Arc<dyn PermissionsService>,
    pub organizations: Arc<dyn OrganizationsService>,
    pub invitations: Arc<dyn InvitationsService>,
    pub teams: Arc<dyn TeamsService>,
    pub tasks: Arc<dyn TasksService>,
    pub calendar: Arc<dyn CalendarService>,
    pub recruitment: Arc<dyn RecruitmentService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(&Db::new(pool)))
    }

    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            permissions: Arc::new(PgPermissionsService::new(db.clone())),
            organizations: Arc::new(PgOrganizationsService::new(db.clone())),
            invitations: Arc::new(PgInvitationsService::new(db.clone())),
            teams: Arc::new(PgTeamsService::new(db.clone())),
            tasks: Arc::new(PgTasksService::new(db.clone())),
            calendar: Arc::new(PgCalendarService::new(db.clone())),
            recruitment: Arc::new(PgRecruitmentService::new(db.clone())),
        }
    }
}
