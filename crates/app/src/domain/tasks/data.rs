//! Task Data

use jiff::Timestamp;

use crate::domain::{
    tasks::records::{TaskPriority, TaskStatus, TaskUuid},
    teams::records::TeamUuid,
    users::records::UserUuid,
};

/// New Task
#[derive(Debug, Clone)]
pub struct NewTask {
    pub uuid: TaskUuid,
    pub team: Option<TeamUuid>,
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub assigned_to: Option<UserUuid>,
}

/// Task changes; outer `None` leaves a field untouched.
///
/// `Some(None)` clears the due date or the assignee.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<Timestamp>>,
    pub assigned_to: Option<Option<UserUuid>>,
}
