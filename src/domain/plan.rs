//! Starter plan template
//!
//! A fixed five-task plan used to seed a fresh project with a sensible
//! scope -> design -> build -> integrate -> test chain.

use super::task::Task;

/// Returns the starter plan: five dependent tasks covering a small delivery
pub fn starter_plan() -> Vec<Task> {
    vec![
        Task::new("t1", "Scope & Requirements").with_duration(1),
        Task::new("t2", "Design").with_duration(1).with_dependency("t1"),
        Task::new("t3", "Core Build").with_duration(2).with_dependency("t2"),
        Task::new("t4", "Integrations").with_duration(1).with_dependency("t3"),
        Task::new("t5", "Testing & Launch Prep")
            .with_duration(1)
            .with_dependency("t4"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate::validate_tasks;

    #[test]
    fn starter_plan_is_a_clean_chain() {
        let plan = starter_plan();
        assert_eq!(plan.len(), 5);
        assert!(validate_tasks(&plan).is_empty());

        // Each task after the first depends on its predecessor
        for pair in plan.windows(2) {
            assert_eq!(pair[1].depends_on, vec![pair[0].id.clone()]);
        }
    }

    #[test]
    fn starter_plan_takes_six_days() {
        let total: u32 = starter_plan().iter().map(|t| t.duration_days).sum();
        assert_eq!(total, 6);
    }
}
