//! Critical path analysis
//!
//! Classic CPM over the dependency graph: a forward pass computes the
//! earliest start/finish offset of every task, a backward pass the latest
//! start/finish that still meets the project duration. The difference
//! (slack) is the number of days a task can slip without moving the
//! project finish; zero-slack tasks form the critical path.
//!
//! All offsets are integer day counts from the project start, so critical
//! membership is exact equality rather than a float tolerance.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::graph::{GraphError, TaskGraph};
use super::schedule::{compute_schedule, ScheduledTask};
use super::task::Task;

/// Per-task CPM offsets, in whole days from the project start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    pub earliest_start: i64,
    pub earliest_finish: i64,
    pub latest_start: i64,
    pub latest_finish: i64,
}

impl TaskTiming {
    /// Days this task can slip without delaying the project
    pub fn slack(&self) -> i64 {
        self.latest_start - self.earliest_start
    }
}

/// Result of a CPM run over a task list
#[derive(Debug, Clone, PartialEq)]
pub struct CpmAnalysis {
    timings: HashMap<String, TaskTiming>,
    project_duration: i64,
}

impl CpmAnalysis {
    /// Minimum number of days the whole project needs
    pub fn project_duration(&self) -> i64 {
        self.project_duration
    }

    /// CPM offsets for a task, if it exists in the analyzed plan
    pub fn timing(&self, task_id: &str) -> Option<&TaskTiming> {
        self.timings.get(task_id)
    }

    /// Slack for a task, if it exists in the analyzed plan
    pub fn slack(&self, task_id: &str) -> Option<i64> {
        self.timings.get(task_id).map(TaskTiming::slack)
    }

    /// Returns true if the task exists and has zero slack
    pub fn is_critical(&self, task_id: &str) -> bool {
        self.slack(task_id) == Some(0)
    }

    /// The set of zero-slack task identifiers
    pub fn critical_path(&self) -> HashSet<String> {
        self.timings
            .iter()
            .filter(|(_, timing)| timing.slack() == 0)
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Runs forward and backward CPM passes over a task list
///
/// Fails with [`GraphError::CycleDetected`] when the dependency graph is
/// cyclic.
pub fn analyze(tasks: &[Task]) -> Result<CpmAnalysis, GraphError> {
    let graph = TaskGraph::from_tasks(tasks);
    let order = graph.topological_order()?;

    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let duration = |id: &str| -> i64 {
        by_id
            .get(id)
            .map(|t| i64::from(t.effective_duration()))
            .unwrap_or(0)
    };

    // Forward pass: earliest start is the latest earliest-finish among
    // dependencies, or 0 for a task with none.
    let mut earliest_start: HashMap<&str, i64> = HashMap::new();
    let mut earliest_finish: HashMap<&str, i64> = HashMap::new();

    for &id in &order {
        let es = graph
            .dependencies(id)
            .iter()
            .filter_map(|dep| earliest_finish.get(dep))
            .max()
            .copied()
            .unwrap_or(0);

        earliest_start.insert(id, es);
        earliest_finish.insert(id, es + duration(id));
    }

    let project_duration = earliest_finish.values().max().copied().unwrap_or(0);

    // Backward pass: latest finish is the earliest latest-start among
    // dependents, or the project duration for a task nothing depends on.
    let mut latest_start: HashMap<&str, i64> = HashMap::new();
    let mut latest_finish: HashMap<&str, i64> = HashMap::new();

    for &id in order.iter().rev() {
        let lf = graph
            .dependents(id)
            .iter()
            .filter_map(|dependent| latest_start.get(dependent))
            .min()
            .copied()
            .unwrap_or(project_duration);

        latest_finish.insert(id, lf);
        latest_start.insert(id, lf - duration(id));
    }

    let timings = order
        .iter()
        .map(|&id| {
            (
                id.to_string(),
                TaskTiming {
                    earliest_start: earliest_start.get(id).copied().unwrap_or(0),
                    earliest_finish: earliest_finish.get(id).copied().unwrap_or(0),
                    latest_start: latest_start.get(id).copied().unwrap_or(0),
                    latest_finish: latest_finish.get(id).copied().unwrap_or(0),
                },
            )
        })
        .collect();

    Ok(CpmAnalysis {
        timings,
        project_duration,
    })
}

/// The set of task identifiers on the critical path
pub fn critical_path(tasks: &[Task]) -> Result<HashSet<String>, GraphError> {
    Ok(analyze(tasks)?.critical_path())
}

/// Computes the calendar schedule with slack and critical-path annotations
pub fn schedule_with_slack(
    tasks: &[Task],
    reference: NaiveDate,
) -> Result<Vec<ScheduledTask>, GraphError> {
    let analysis = analyze(tasks)?;
    let mut schedule = compute_schedule(tasks, reference)?;

    for scheduled in &mut schedule {
        scheduled.slack = analysis.slack(&scheduled.task.id);
        scheduled.critical = Some(analysis.is_critical(&scheduled.task.id));
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Task> {
        vec![
            Task::new("t1", "Scope").with_duration(1),
            Task::new("t2", "Design").with_duration(2).with_dependency("t1"),
            Task::new("t3", "Build").with_duration(1).with_dependency("t2"),
        ]
    }

    #[test]
    fn empty_plan_has_empty_path() {
        let analysis = analyze(&[]).unwrap();
        assert_eq!(analysis.project_duration(), 0);
        assert!(analysis.critical_path().is_empty());
    }

    #[test]
    fn single_task_is_critical() {
        let tasks = vec![Task::new("t1", "Scope").with_duration(3)];
        let analysis = analyze(&tasks).unwrap();

        assert_eq!(analysis.project_duration(), 3);
        assert!(analysis.is_critical("t1"));
    }

    #[test]
    fn whole_chain_is_critical() {
        let path = critical_path(&chain()).unwrap();
        let expected: HashSet<String> =
            ["t1", "t2", "t3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn parallel_short_task_has_slack() {
        let mut tasks = chain();
        tasks.push(Task::new("t4", "Research").with_duration(1));

        let analysis = analyze(&tasks).unwrap();
        assert_eq!(analysis.project_duration(), 4);
        assert_eq!(analysis.slack("t4"), Some(3));
        assert!(!analysis.is_critical("t4"));

        let path = analysis.critical_path();
        assert!(path.contains("t1"));
        assert!(path.contains("t2"));
        assert!(path.contains("t3"));
        assert!(!path.contains("t4"));
    }

    #[test]
    fn delay_moves_the_critical_branch() {
        // Two branches off a common root; the delayed one becomes critical
        let tasks = vec![
            Task::new("root", "Root").with_duration(1),
            Task::new("fast", "Fast").with_duration(1).with_dependency("root"),
            Task::new("slow", "Slow")
                .with_duration(1)
                .with_delay(4)
                .with_dependency("root"),
        ];

        let analysis = analyze(&tasks).unwrap();
        assert!(analysis.is_critical("root"));
        assert!(analysis.is_critical("slow"));
        assert!(!analysis.is_critical("fast"));
        assert_eq!(analysis.slack("fast"), Some(4));
    }

    #[test]
    fn timings_match_cpm_offsets() {
        let analysis = analyze(&chain()).unwrap();
        let t2 = analysis.timing("t2").unwrap();

        assert_eq!(t2.earliest_start, 1);
        assert_eq!(t2.earliest_finish, 3);
        assert_eq!(t2.latest_start, 1);
        assert_eq!(t2.latest_finish, 3);
        assert_eq!(t2.slack(), 0);
    }

    #[test]
    fn cycle_fails() {
        let tasks = vec![
            Task::new("a", "A").with_dependency("b"),
            Task::new("b", "B").with_dependency("a"),
        ];

        assert!(matches!(
            critical_path(&tasks),
            Err(GraphError::CycleDetected(_))
        ));
    }

    #[test]
    fn schedule_with_slack_annotates_every_task() {
        let mut tasks = chain();
        tasks.push(Task::new("t4", "Research").with_duration(1));

        let reference = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let schedule = schedule_with_slack(&tasks, reference).unwrap();

        assert_eq!(schedule[0].slack, Some(0));
        assert_eq!(schedule[0].critical, Some(true));
        assert_eq!(schedule[3].slack, Some(3));
        assert_eq!(schedule[3].critical, Some(false));
    }
}
