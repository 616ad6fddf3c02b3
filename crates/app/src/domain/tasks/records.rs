//! Task Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        UnknownVariant,
        organizations::records::OrganizationUuid,
        teams::records::TeamUuid,
        users::records::{UserSummary, UserUuid},
    },
    uuids::TypedUuid,
};

/// Task UUID
pub type TaskUuid = TypedUuid<TaskRecord>;

/// Task Comment UUID
pub type TaskCommentUuid = TypedUuid<TaskCommentRecord>;

/// Board column of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    pub const ALL: &'static [Self] = &[Self::Todo, Self::InProgress, Self::Review, Self::Completed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Completed => "completed",
        }
    }

    /// The `completed_at` a task carries after moving into this status.
    ///
    /// Entering `completed` stamps `now`, staying keeps the existing stamp and
    /// any other status clears it.
    #[must_use]
    pub fn completed_at(self, current: Option<Timestamp>, now: Timestamp) -> Option<Timestamp> {
        match self {
            Self::Completed => current.or(Some(now)),
            Self::Todo | Self::InProgress | Self::Review => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "review" => Ok(Self::Review),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownVariant::new("task status", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(UnknownVariant::new("task priority", value)),
        }
    }
}

/// Task Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub uuid: TaskUuid,
    pub organization_uuid: OrganizationUuid,

    /// `None` for organization-level tasks.
    pub team_uuid: Option<TeamUuid>,

    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub assigned_to: Option<UserUuid>,
    pub created_by: UserUuid,

    /// Set exactly when `status` is [`TaskStatus::Completed`].
    pub completed_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A task as listed on a board, with the people it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummaryRecord {
    pub task: TaskRecord,
    pub assignee: Option<UserSummary>,
    pub creator: UserSummary,
}

/// Task Comment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCommentRecord {
    pub uuid: TaskCommentUuid,
    pub task_uuid: TaskUuid,
    pub author: UserSummary,
    pub content: String,
    pub created_at: Timestamp,
}

/// A task with its comment thread, oldest comment first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailsRecord {
    pub task: TaskRecord,
    pub comments: Vec<TaskCommentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_parse_from_storage_form() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>(), Ok(*status));
        }

        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn entering_completed_stamps_now() {
        let now = Timestamp::from_second(1_000).unwrap_or(Timestamp::UNIX_EPOCH);

        assert_eq!(TaskStatus::Completed.completed_at(None, now), Some(now));
    }

    #[test]
    fn staying_completed_keeps_the_original_stamp() {
        let earlier = Timestamp::UNIX_EPOCH;
        let now = Timestamp::from_second(1_000).unwrap_or(Timestamp::UNIX_EPOCH);

        assert_eq!(
            TaskStatus::Completed.completed_at(Some(earlier), now),
            Some(earlier)
        );
    }

    #[test]
    fn leaving_completed_clears_the_stamp() {
        let now = Timestamp::UNIX_EPOCH;

        for status in [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Review] {
            assert_eq!(status.completed_at(Some(now), now), None);
        }
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!("urgent".parse::<TaskPriority>(), Ok(TaskPriority::Urgent));
    }
}
