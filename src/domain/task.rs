//! Task domain model
//!
//! Tasks are the units of work within a project plan. Each task carries a
//! nominal duration, the identifiers of the tasks it depends on, and any
//! delay recorded against it while the project is underway.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" | "todo" | "open" => Ok(TaskStatus::Pending),
            "done" | "complete" | "completed" => Ok(TaskStatus::Done),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Priority of a task, used by the diagnostics rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

fn default_duration() -> u32 {
    1
}

fn default_role() -> String {
    "general".to_string()
}

/// A task within a project plan
///
/// Identifiers are caller-assigned strings, unique within a project.
/// `depends_on` lists the identifiers of tasks this one cannot start before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within the project
    pub id: String,

    /// Human-readable name
    pub name: String,

    /// Nominal duration in whole days (at least 1)
    #[serde(default = "default_duration")]
    pub duration_days: u32,

    /// Identifiers of tasks that must finish before this one starts
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Delay accumulated against this task, in whole days
    #[serde(default)]
    pub delay_days: u32,

    /// Optional priority, consumed by diagnostics only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Role tag, consumed by diagnostics only
    #[serde(default = "default_role")]
    pub role: String,
}

impl Task {
    /// Creates a new pending task with the default duration
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration_days: default_duration(),
            depends_on: Vec::new(),
            status: TaskStatus::default(),
            delay_days: 0,
            priority: None,
            role: default_role(),
        }
    }

    /// Sets the duration in days
    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    /// Adds a dependency on another task
    pub fn with_dependency(mut self, dep: impl Into<String>) -> Self {
        self.depends_on.push(dep.into());
        self
    }

    /// Sets the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the role tag
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the accumulated delay in days
    pub fn with_delay(mut self, days: u32) -> Self {
        self.delay_days = days;
        self
    }

    /// Marks the task as done
    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
    }

    /// Records additional delay against this task
    pub fn add_delay(&mut self, days: u32) {
        self.delay_days += days;
    }

    /// Duration actually used in date arithmetic: nominal duration plus delay
    pub fn effective_duration(&self) -> u32 {
        self.duration_days + self.delay_days
    }
}
