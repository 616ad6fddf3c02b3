//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display details of a user referenced by another record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
}
