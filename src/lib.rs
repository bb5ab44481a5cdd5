//! pulse - A project schedule and health diagnosis CLI
//!
//! pulse turns a project's task list (durations, dependencies, recorded
//! delays) into a concrete calendar schedule, finds the critical path, and
//! produces actionable health recommendations. The engine in [`domain`] is
//! pure computation; [`storage`] persists projects to a workspace and
//! [`cli`] wires the two together.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{
    analyze, compute_schedule, critical_path, diagnose, project_status, schedule_with_slack,
    starter_plan, validate_tasks, CpmAnalysis, GraphError, Priority, Project, ProjectHealth,
    ProjectId, ScheduledTask, StatusReport, Task, TaskGraph, TaskStatus,
};
