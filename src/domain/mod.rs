//! Domain models and the scheduling engine
//!
//! Contains the core business logic without any I/O concerns: the task and
//! project models, the dependency graph, calendar scheduling, critical-path
//! analysis, diagnostics, and status reporting. Everything here is a pure
//! function over an explicitly passed task list; persistence and
//! presentation live in the `storage` and `cli` layers.

mod critical;
mod diagnose;
mod graph;
mod plan;
mod project;
mod schedule;
mod status;
mod task;
mod validate;

pub use critical::{analyze, critical_path, schedule_with_slack, CpmAnalysis, TaskTiming};
pub use diagnose::diagnose;
pub use graph::{GraphError, TaskGraph};
pub use plan::starter_plan;
pub use project::{IdError, Project, ProjectId};
pub use schedule::{compute_schedule, ScheduledTask};
pub use status::{project_status, ProjectHealth, StatusReport};
pub use task::{Priority, Task, TaskStatus};
pub use validate::{validate_tasks, Issue, IssueKind};
