//! Task model definitions

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Longest description the server accepts
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Task status, with the exact names the server uses on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Inprogress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Inprogress => "inprogress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::Inprogress),
            "completed" => Ok(Self::Completed),
            other => Err(Error::validation(format!("Unknown status: {}", other))),
        }
    }
}

/// View filter over the cached task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Status(TaskStatus),
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::All
    }
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => task.status == *status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(Self::All);
        }
        Ok(Self::Status(s.parse()?))
    }
}

/// A task as the server returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub status: TaskStatus,
}

/// Status counts over the full cache, independent of the active filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub todo: usize,
    pub inprogress: usize,
    pub completed: usize,
    pub total: usize,
}

impl TaskStats {
    /// Count tasks per status
    pub fn tally(tasks: &[Task]) -> Self {
        let mut stats = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => stats.todo += 1,
                TaskStatus::Inprogress => stats.inprogress += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            stats.total += 1;
        }
        stats
    }
}

/// Check a description before it is sent to the server.
///
/// Returns the trimmed text; the server never sees surrounding whitespace.
pub fn validate_description(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Task description cannot be empty"));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::validation(format!(
            "Task description is too long (max {} characters)",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_description_trims() {
        let description = validate_description("  water the plants  ").unwrap();
        assert_eq!(description, "water the plants");
    }

    #[test]
    fn test_validate_description_rejects_blank() {
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
    }

    #[test]
    fn test_validate_description_length_boundary() {
        let exactly_max = "x".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description(&exactly_max).is_ok());

        let too_long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_description(&too_long).is_err());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Inprogress).unwrap(),
            "\"inprogress\""
        );
        assert_eq!(TaskStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<TaskStatus> = "done".parse();
        assert!(result.is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_filter_matches() {
        let task = Task {
            id: 1,
            description: "a".to_string(),
            status: TaskStatus::Todo,
        };
        assert!(StatusFilter::All.matches(&task));
        assert!(StatusFilter::Status(TaskStatus::Todo).matches(&task));
        assert!(!StatusFilter::Status(TaskStatus::Completed).matches(&task));
    }

    #[test]
    fn test_stats_tally() {
        let tasks = vec![
            Task {
                id: 1,
                description: "a".to_string(),
                status: TaskStatus::Todo,
            },
            Task {
                id: 2,
                description: "b".to_string(),
                status: TaskStatus::Completed,
            },
            Task {
                id: 3,
                description: "c".to_string(),
                status: TaskStatus::Todo,
            },
        ];

        let stats = TaskStats::tally(&tasks);
        assert_eq!(stats.todo, 2);
        assert_eq!(stats.inprogress, 0);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.total, 3);
    }
}
