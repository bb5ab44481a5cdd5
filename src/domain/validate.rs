//! Plan integrity checks
//!
//! Structural validation of a task list before scheduling. The scheduler
//! itself is lenient about dangling references; this pass is where callers
//! that want strictness surface them. Detects:
//! - Duplicate task identifiers
//! - Dependencies on unknown tasks
//! - Self-dependencies
//! - Zero durations

use std::collections::HashSet;

use super::task::Task;

/// Categories of plan issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Two tasks share the same identifier
    DuplicateTaskId,
    /// A task depends on an identifier absent from the plan
    UnknownDependency,
    /// A task depends on itself
    SelfDependency,
    /// A task has a zero-day duration
    ZeroDuration,
}

/// A single plan issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue category
    pub kind: IssueKind,
    /// Human-readable description naming the offending task
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Checks a task list for structural problems
///
/// Returns all detected issues; an empty vector means a clean plan. Cycle
/// detection is not repeated here, it belongs to the graph layer.
pub fn validate_tasks(tasks: &[Task]) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            issues.push(Issue::new(
                IssueKind::DuplicateTaskId,
                format!("Duplicate task ID: '{}'", task.id),
            ));
        }
    }

    let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    for task in tasks {
        for dep in &task.depends_on {
            if dep == &task.id {
                issues.push(Issue::new(
                    IssueKind::SelfDependency,
                    format!("Task '{}' depends on itself", task.id),
                ));
            } else if !known.contains(dep.as_str()) {
                issues.push(Issue::new(
                    IssueKind::UnknownDependency,
                    format!("Task '{}' depends on unknown task '{}'", task.id, dep),
                ));
            }
        }

        if task.duration_days == 0 {
            issues.push(Issue::new(
                IssueKind::ZeroDuration,
                format!("Task '{}' has a zero-day duration", task.id),
            ));
        }
    }

    issues
}
