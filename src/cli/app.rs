//! Main CLI application structure

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{project_cmd, report, task_cmd};
use crate::domain::starter_plan;
use crate::storage::{StoreError, Workspace};

#[derive(Parser)]
#[command(name = "pulse")]
#[command(author, version, about = "Project schedule and health diagnosis")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the workspace config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new pulse workspace
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage projects
    #[command(subcommand)]
    Project(project_cmd::ProjectCommands),

    /// Seed the active project with the starter plan
    Plan {
        /// Replace an existing task list
        #[arg(long)]
        force: bool,
    },

    /// Manage tasks on the active project
    #[command(subcommand)]
    Task(task_cmd::TaskCommands),

    /// Show the computed schedule with slack per task
    Schedule,

    /// Show the critical path
    CriticalPath,

    /// Diagnose project health and print recommendations
    Doctor,

    /// Show project status against its deadline
    Status,
}

/// Parses arguments and dispatches to command handlers
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { path } = &cli.command {
        let out = Output::new(cli.format.unwrap_or_default(), cli.verbose);
        let workspace = Workspace::init(path)?;
        out.success(&format!(
            "Initialized pulse workspace at {}",
            workspace.root().display()
        ));
        return Ok(());
    }

    let workspace = Workspace::open_current()?;
    let out = Output::new(resolve_format(&cli, &workspace), cli.verbose);

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Project(cmd) => project_cmd::run(cmd, &workspace, &out),
        Commands::Plan { force } => seed_plan(&workspace, &out, force),
        Commands::Task(cmd) => task_cmd::run(cmd, &workspace, &out),
        Commands::Schedule => report::schedule(&workspace, &out),
        Commands::CriticalPath => report::critical(&workspace, &out),
        Commands::Doctor => report::doctor(&workspace, &out),
        Commands::Status => report::status(&workspace, &out),
    }
}

/// The --format flag wins; otherwise the workspace config, then text
fn resolve_format(cli: &Cli, workspace: &Workspace) -> OutputFormat {
    cli.format.unwrap_or_else(|| {
        workspace
            .config()
            .default_format
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    })
}

fn seed_plan(workspace: &Workspace, out: &Output, force: bool) -> Result<()> {
    let store = workspace.store();
    let project = store.active()?.ok_or(StoreError::NoActiveProject)?;

    if !project.tasks.is_empty() && !force {
        bail!(
            "Project {} already has {} tasks. Use --force to replace them.",
            project.id,
            project.tasks.len()
        );
    }

    let plan = starter_plan();
    let count = plan.len();
    store.save_tasks(&project.id, plan)?;

    out.success(&format!("Seeded {} with a {}-task starter plan.", project.id, count));
    Ok(())
}
