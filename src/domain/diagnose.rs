//! Project health diagnostics
//!
//! Evaluates a fixed rule set against a project's task list and its
//! critical path, producing ordered, human-readable recommendations:
//! accumulated delay (escalated when the worst-delayed task is critical),
//! priority saturation, and role concentration. Read-only: task state is
//! never mutated.

use std::collections::HashMap;

use super::critical::critical_path;
use super::graph::GraphError;
use super::project::Project;
use super::task::{Priority, Task};

/// Diagnoses a project and returns recommendations, most severe first
///
/// A project with no tasks gets a single starter recommendation; a project
/// that trips no rule gets a single healthy note. Fails with
/// [`GraphError::CycleDetected`] when the dependency graph is cyclic.
pub fn diagnose(project: &Project) -> Result<Vec<String>, GraphError> {
    let tasks = &project.tasks;
    if tasks.is_empty() {
        return Ok(vec!["Add some tasks to get started.".to_string()]);
    }

    let critical = critical_path(tasks)?;
    let mut recommendations = Vec::new();

    // Delay accumulation
    let total_delay: u32 = tasks.iter().map(|t| t.delay_days).sum();
    if total_delay > 0 {
        recommendations.push(format!(
            "Project has accumulated {} days of total delay.",
            total_delay
        ));
    }

    if let Some(worst) = worst_delayed(tasks) {
        if critical.contains(&worst.id) {
            recommendations.push(format!(
                "CRITICAL: Task '{}' is delayed by {} days and is blocking the project. \
                 IMMEDIATE ACTION: Add resources to this task.",
                worst.name, worst.delay_days
            ));
        } else {
            recommendations.push(format!(
                "Task '{}' is delayed by {} days but is not critical. Monitor it.",
                worst.name, worst.delay_days
            ));
        }
    }

    // Priority saturation: more than half the tasks marked high
    let high_count = tasks
        .iter()
        .filter(|t| t.priority == Some(Priority::High))
        .count();
    if high_count * 2 > tasks.len() {
        recommendations.push(
            "Warning: More than 50% of tasks are marked high priority. \
             Re-evaluate priorities."
                .to_string(),
        );
    }

    // Role concentration: one role covering more than 70% of tasks
    if let Some((role, count)) = dominant_role(tasks) {
        if count * 10 > tasks.len() * 7 {
            recommendations.push(format!(
                "Bottleneck warning: {} of {} tasks need the '{}' role. \
                 Verify you have enough {} capacity.",
                count,
                tasks.len(),
                role,
                role
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push("Project looks healthy! Keep it up.".to_string());
    }

    Ok(recommendations)
}

/// The task with the single largest positive delay, first occurrence wins
fn worst_delayed(tasks: &[Task]) -> Option<&Task> {
    let mut worst: Option<&Task> = None;
    for task in tasks {
        if task.delay_days > worst.map(|t| t.delay_days).unwrap_or(0) {
            worst = Some(task);
        }
    }
    worst
}

/// The most frequent role tag, first-encountered role wins ties
fn dominant_role(tasks: &[Task]) -> Option<(&str, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen_order: Vec<&str> = Vec::new();

    for task in tasks {
        let count = counts.entry(task.role.as_str()).or_insert(0);
        if *count == 0 {
            seen_order.push(task.role.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for role in seen_order {
        let count = counts[role];
        if count > best.map(|(_, c)| c).unwrap_or(0) {
            best = Some((role, count));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_with(tasks: Vec<Task>) -> Project {
        Project::new("Test").with_tasks(tasks)
    }

    #[test]
    fn empty_project_suggests_adding_tasks() {
        let recs = diagnose(&project_with(vec![])).unwrap();
        assert_eq!(recs, vec!["Add some tasks to get started.".to_string()]);
    }

    #[test]
    fn healthy_project() {
        let project = project_with(vec![
            Task::new("t1", "Scope").with_role("backend"),
            Task::new("t2", "Design").with_role("design").with_dependency("t1"),
        ]);

        let recs = diagnose(&project).unwrap();
        assert_eq!(recs.len(), 1);
        assert!(recs[0].to_lowercase().contains("healthy"));
    }

    #[test]
    fn delayed_critical_task_escalates() {
        let project = project_with(vec![Task::new("t3", "Critical Task")
            .with_duration(2)
            .with_delay(5)]);

        let recs = diagnose(&project).unwrap();
        assert!(recs.iter().any(|r| r.contains("accumulated 5 days")));

        let escalation = recs.iter().find(|r| r.contains("CRITICAL")).unwrap();
        assert!(escalation.contains("Critical Task"));
        assert!(escalation.contains("5"));
        assert!(escalation.contains("Add resources"));
    }

    #[test]
    fn delayed_side_task_gets_monitor_note() {
        // The chain a->b dominates; "side" has slack, so its delay is not
        // large enough to put it on the critical path
        let project = project_with(vec![
            Task::new("a", "A").with_duration(5),
            Task::new("b", "B").with_duration(5).with_dependency("a"),
            Task::new("side", "Side Task").with_duration(1).with_delay(2),
        ]);

        let recs = diagnose(&project).unwrap();
        let note = recs.iter().find(|r| r.contains("Side Task")).unwrap();
        assert!(note.contains("Monitor"));
        assert!(!note.contains("CRITICAL"));
    }

    #[test]
    fn worst_delay_tie_goes_to_first_task() {
        let project = project_with(vec![
            Task::new("a", "First").with_duration(9).with_delay(3),
            Task::new("b", "Second").with_duration(9).with_delay(3),
        ]);

        let recs = diagnose(&project).unwrap();
        assert!(recs.iter().any(|r| r.contains("First")));
        assert!(!recs.iter().any(|r| r.contains("Second")));
    }

    #[test]
    fn priority_saturation_warns() {
        let project = project_with(vec![
            Task::new("t1", "A").with_priority(Priority::High),
            Task::new("t2", "B").with_priority(Priority::High),
            Task::new("t3", "C"),
        ]);

        let recs = diagnose(&project).unwrap();
        assert!(recs.iter().any(|r| r.contains("Re-evaluate priorities")));
    }

    #[test]
    fn half_high_priority_does_not_warn() {
        let project = project_with(vec![
            Task::new("t1", "A").with_priority(Priority::High),
            Task::new("t2", "B").with_priority(Priority::Low),
        ]);

        let recs = diagnose(&project).unwrap();
        assert!(!recs.iter().any(|r| r.contains("Re-evaluate priorities")));
    }

    #[test]
    fn role_concentration_names_the_role() {
        let mut tasks: Vec<Task> = (1..=5)
            .map(|i| Task::new(format!("t{}", i), format!("Task {}", i)).with_role("backend"))
            .collect();
        tasks.push(Task::new("t6", "Task 6").with_role("design"));

        let recs = diagnose(&project_with(tasks)).unwrap();
        let warning = recs.iter().find(|r| r.contains("Bottleneck")).unwrap();
        assert!(warning.contains("backend"));
        assert!(warning.contains("5 of 6"));
    }

    #[test]
    fn untagged_tasks_count_as_general() {
        let tasks: Vec<Task> = (1..=4)
            .map(|i| Task::new(format!("t{}", i), format!("Task {}", i)))
            .collect();

        let recs = diagnose(&project_with(tasks)).unwrap();
        let warning = recs.iter().find(|r| r.contains("Bottleneck")).unwrap();
        assert!(warning.contains("general"));
    }

    #[test]
    fn balanced_roles_do_not_warn() {
        let project = project_with(vec![
            Task::new("t1", "A").with_role("backend"),
            Task::new("t2", "B").with_role("frontend"),
            Task::new("t3", "C").with_role("design"),
        ]);

        let recs = diagnose(&project).unwrap();
        assert!(!recs.iter().any(|r| r.contains("Bottleneck")));
    }

    #[test]
    fn cyclic_plan_is_an_error() {
        let project = project_with(vec![
            Task::new("a", "A").with_dependency("b"),
            Task::new("b", "B").with_dependency("a"),
        ]);

        assert!(matches!(
            diagnose(&project),
            Err(GraphError::CycleDetected(_))
        ));
    }

    #[test]
    fn diagnose_does_not_mutate() {
        let project = project_with(vec![Task::new("t1", "Scope").with_delay(2)]);
        let before = project.clone();
        diagnose(&project).unwrap();
        assert_eq!(project, before);
    }
}
