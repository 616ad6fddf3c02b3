//! Team Member Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::teams::records::TeamMemberRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TeamMemberResponse {
    pub uuid: Uuid,
    pub team_uuid: Uuid,
    pub user_uuid: Uuid,
    pub role: String,
    pub joined_at: String,
}

impl From<TeamMemberRecord> for TeamMemberResponse {
    fn from(member: TeamMemberRecord) -> Self {
        TeamMemberResponse {
            uuid: member.uuid.into(),
            team_uuid: member.team_uuid.into(),
            user_uuid: member.user_uuid.into(),
            role: member.role.to_string(),
            joined_at: member.joined_at.to_string(),
        }
    }
}
