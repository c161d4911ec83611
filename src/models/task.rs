use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Transitions are unconstrained: an owning update may set any status
/// regardless of the current one.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Task is yet to be started. Initial status of every new task.
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is done. Transitioning into this status earns the owner a
    /// motivational message.
    Completed,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// `username` references the owning user; every query against this table is
/// filtered by the authenticated caller's username, so a task is only ever
/// visible to its owner.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Auto-assigned numeric identifier.
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Set once, server-side, in UTC at creation time.
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    /// Username of the owning user.
    pub username: String,
}

/// Input for creating a task. Status and creation timestamp are assigned
/// server-side, never taken from the client.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// The title of the task. Required, at most 150 characters.
    #[validate(length(min = 1, max = 150, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for a full replace of a task's mutable fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 150, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_task_validation() {
        let valid = CreateTaskRequest {
            title: "Buy groceries".to_string(),
            description: Some("Milk and eggs".to_string()),
            due_date: Some(Utc::now()),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: "".to_string(),
            description: None,
            due_date: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = CreateTaskRequest {
            title: "a".repeat(151),
            description: None,
            due_date: None,
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_update_task_validation() {
        let valid = UpdateTaskRequest {
            title: "Buy groceries".to_string(),
            description: None,
            status: TaskStatus::Completed,
            due_date: None,
        };
        assert!(valid.validate().is_ok());

        let empty_title = UpdateTaskRequest {
            title: "".to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: None,
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Completed).unwrap(),
            "\"completed\""
        );

        let status: TaskStatus = serde_json::from_str("\"inProgress\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: 7,
            title: "Write report".to_string(),
            description: None,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
            due_date: None,
            username: "alice".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("dueDate").is_some());
        assert_eq!(json["status"], "pending");
        assert_eq!(json["username"], "alice");
    }
}
