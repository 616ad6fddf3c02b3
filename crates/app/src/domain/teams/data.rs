//! Team Data

use crate::domain::teams::records::TeamUuid;

/// New Team
#[derive(Debug, Clone)]
pub struct NewTeam {
    pub uuid: TeamUuid,
    pub name: String,
    pub description: Option<String>,
}

/// Team changes; `None` leaves a field untouched.
///
/// A blank description clears it.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}
