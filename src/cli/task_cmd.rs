//! Task commands on the active project: add, list, done, delay

use anyhow::{anyhow, bail, Result};
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Priority, Task};
use crate::storage::{StoreError, Workspace};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the active project
    Add {
        /// Task identifier, unique within the project
        id: String,

        /// Human-readable name
        name: String,

        /// Duration in days
        #[arg(long, default_value = "1")]
        duration: u32,

        /// Identifier of a task this one depends on (repeatable)
        #[arg(long = "after")]
        after: Vec<String>,

        /// Priority: low, medium or high
        #[arg(long)]
        priority: Option<String>,

        /// Role tag
        #[arg(long)]
        role: Option<String>,
    },

    /// List tasks on the active project
    List,

    /// Mark a task done
    Done {
        /// Task identifier
        id: String,
    },

    /// Record delay against a task
    Delay {
        /// Task identifier
        id: String,

        /// Delay in days
        days: u32,
    },
}

pub fn run(cmd: TaskCommands, workspace: &Workspace, out: &Output) -> Result<()> {
    let store = workspace.store();

    match cmd {
        TaskCommands::Add {
            id,
            name,
            duration,
            after,
            priority,
            role,
        } => {
            let mut project = store.active()?.ok_or(StoreError::NoActiveProject)?;

            if project.task(&id).is_some() {
                bail!("Task '{}' already exists in project {}", id, project.id);
            }

            let mut task = Task::new(id, name).with_duration(duration);
            for dep in after {
                task = task.with_dependency(dep);
            }
            if let Some(priority) = priority {
                task = task.with_priority(priority.parse::<Priority>().map_err(|e| anyhow!(e))?);
            }
            if let Some(role) = role {
                task = task.with_role(role);
            }

            let task_id = task.id.clone();
            project.tasks.push(task);
            store.save_tasks(&project.id, project.tasks)?;

            out.success(&format!("Added task {}", task_id));
            Ok(())
        }

        TaskCommands::List => {
            let project = store.active()?.ok_or(StoreError::NoActiveProject)?;

            if out.is_json() {
                out.data(&project.tasks);
                return Ok(());
            }

            if project.tasks.is_empty() {
                out.line("No tasks yet. Seed a plan with 'pulse plan'.");
                return Ok(());
            }

            for task in &project.tasks {
                let deps = if task.depends_on.is_empty() {
                    "-".to_string()
                } else {
                    task.depends_on.join(",")
                };
                out.row(&[
                    &task.id,
                    &task.name,
                    &format!("{}d", task.duration_days),
                    &task.status.to_string(),
                    &deps,
                ]);
            }
            Ok(())
        }

        TaskCommands::Done { id } => {
            let task = store.mark_done(&id)?;
            out.success(&format!("Marked {} as done.", task.id));
            Ok(())
        }

        TaskCommands::Delay { id, days } => {
            let task = store.add_delay(&id, days)?;
            out.success(&format!(
                "Delayed {} by {} day(s), {} total.",
                task.id, days, task.delay_days
            ));
            Ok(())
        }
    }
}
