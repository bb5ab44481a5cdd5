//! Project commands: create, list, switch

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use super::output::Output;
use crate::domain::{Project, ProjectId};
use crate::storage::Workspace;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project and make it active
    New {
        /// Project name
        name: String,

        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,

        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List all projects
    List,

    /// Switch the active project
    Use {
        /// Project identifier (p-xxxxxxx)
        id: String,
    },
}

pub fn run(cmd: ProjectCommands, workspace: &Workspace, out: &Output) -> Result<()> {
    match cmd {
        ProjectCommands::New {
            name,
            deadline,
            description,
        } => {
            let mut project = Project::new(name).with_description(description);
            if let Some(deadline) = deadline {
                project = project.with_deadline(deadline);
            }

            let project = workspace.store().create(project)?;

            if out.is_json() {
                out.data(&project);
            } else {
                out.success(&format!("Created project {} ({})", project.name, project.id));
            }
            Ok(())
        }

        ProjectCommands::List => {
            let store = workspace.store();
            let projects = store.projects()?;
            let active_id = store.active_id()?;

            if out.is_json() {
                out.data(&projects);
                return Ok(());
            }

            if projects.is_empty() {
                out.line("No projects yet. Create one with 'pulse project new'.");
                return Ok(());
            }

            for project in &projects {
                let marker = if Some(&project.id) == active_id.as_ref() {
                    "*"
                } else {
                    " "
                };
                let deadline = project
                    .deadline
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                out.row(&[
                    marker,
                    &project.id.to_string(),
                    &project.name,
                    &deadline,
                    &format!("{} tasks", project.tasks.len()),
                ]);
            }
            Ok(())
        }

        ProjectCommands::Use { id } => {
            let id: ProjectId = id.parse()?;
            let project = workspace.store().set_active(&id)?;
            out.success(&format!("Active project: {} ({})", project.name, project.id));
            Ok(())
        }
    }
}
