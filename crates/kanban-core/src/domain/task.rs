//! The task entity shown on the board.
//!
//! Tasks travel as JSON between the front-end, the host, and the task file on
//! disk.  Field names are the snake_case names used on the wire:
//!
//! ```json
//! {"subject":"Review budget","status":"Snooze","priority":2,"wait_until":1700000000,"updated":1699990000}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column a task currently lives in.
///
/// The status is a plain string on the wire.  Values the host does not know
/// about are kept verbatim in [`TaskStatus::Other`] so that a front-end with
/// extra columns never loses data when the board is stored and reloaded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Snooze,
    Done,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Snooze => "Snooze",
            TaskStatus::Done => "Done",
            TaskStatus::Other(s) => s,
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Todo" => TaskStatus::Todo,
            "InProgress" => TaskStatus::InProgress,
            "Snooze" => TaskStatus::Snooze,
            "Done" => TaskStatus::Done,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Task {
    /// Free-form title of the task.
    pub subject: String,
    pub status: TaskStatus,
    /// Higher numbers sort first in the front-end.
    pub priority: i32,
    /// Epoch seconds until which a snoozed task stays hidden in the Snooze column.
    pub wait_until: Option<u64>,
    /// Epoch seconds of the last change made by the front-end.
    pub updated: u64,
}

impl Task {
    pub fn new(subject: impl Into<String>, status: TaskStatus, updated: u64) -> Self {
        Self {
            subject: subject.into(),
            status,
            priority: 0,
            wait_until: None,
            updated,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status_parses_to_variant() {
        assert_eq!(TaskStatus::from("Snooze".to_string()), TaskStatus::Snooze);
        assert_eq!(TaskStatus::from("InProgress".to_string()), TaskStatus::InProgress);
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        // Arrange
        let json = r#"{"subject":"a","status":"Blocked","priority":1,"wait_until":null,"updated":5}"#;

        // Act
        let task: Task = serde_json::from_str(json).unwrap();
        let back = serde_json::to_string(&task).unwrap();

        // Assert
        assert_eq!(task.status, TaskStatus::Other("Blocked".to_string()));
        assert_eq!(back, json);
    }

    #[test]
    fn test_task_serializes_with_snake_case_fields() {
        let mut task = Task::new("Review budget", TaskStatus::Snooze, 10);
        task.wait_until = Some(20);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["status"], "Snooze");
        assert_eq!(value["wait_until"], 20);
        assert_eq!(value["updated"], 10);
    }

    #[test]
    fn test_missing_wait_until_deserializes_as_none() {
        let json = r#"{"subject":"a","status":"Todo","priority":0,"updated":1}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.wait_until, None);
    }

    #[test]
    fn test_status_display_matches_wire_value() {
        assert_eq!(TaskStatus::Done.to_string(), "Done");
        assert_eq!(TaskStatus::Other("X".into()).to_string(), "X");
    }
}
