//! Calendar schedule computation
//!
//! Turns a task list into concrete start/end dates anchored to a reference
//! "today". A task starts at the reference date or the day after its latest
//! dependency finishes, whichever is later, and occupies `effective
//! duration` consecutive days (a 1-day task starts and ends the same day).
//!
//! Dates are computed in topological order so dependency end dates are
//! always settled first, but the returned schedule preserves the input
//! order so callers can zip it back against the original task list.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::graph::{GraphError, TaskGraph};
use super::task::Task;

/// A task paired with its computed calendar window
///
/// `slack` and `critical` are only present when the schedule was produced
/// with critical-path analysis (see [`crate::domain::schedule_with_slack`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,

    /// First day of work on this task
    pub start: NaiveDate,

    /// Last day of work on this task
    pub end: NaiveDate,

    /// Days this task can slip without moving the project finish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<i64>,

    /// True if this task is on the critical path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
}

/// Computes start and end dates for every task, anchored to `reference`
///
/// The output is in input order, one entry per task. Fails with
/// [`GraphError::CycleDetected`] when the dependency graph is cyclic.
pub fn compute_schedule(
    tasks: &[Task],
    reference: NaiveDate,
) -> Result<Vec<ScheduledTask>, GraphError> {
    let graph = TaskGraph::from_tasks(tasks);
    let order = graph.topological_order()?;

    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut windows: HashMap<&str, (NaiveDate, NaiveDate)> = HashMap::new();

    for id in order {
        let Some(task) = by_id.get(id).copied() else {
            continue;
        };

        let mut start = reference;
        for dep in &task.depends_on {
            // Unresolved dependencies impose no constraint
            if let Some(&(_, dep_end)) = windows.get(dep.as_str()) {
                start = start.max(dep_end + Duration::days(1));
            }
        }

        // A task occupies its start day, so a 1-day task ends where it starts
        let span = i64::from(task.effective_duration().saturating_sub(1));
        let end = start + Duration::days(span);

        windows.insert(id, (start, end));
    }

    Ok(tasks
        .iter()
        .filter_map(|t| {
            windows
                .get(t.id.as_str())
                .map(|&(start, end)| ScheduledTask {
                    task: t.clone(),
                    start,
                    end,
                    slack: None,
                    critical: None,
                })
        })
        .collect())
}
