//! Reporting commands: schedule, critical path, doctor, status

use anyhow::Result;
use chrono::{Local, NaiveDate};

use super::output::Output;
use crate::domain::{
    critical_path, diagnose, project_status, schedule_with_slack, validate_tasks, Project,
};
use crate::storage::{StoreError, Workspace};

fn active_project(workspace: &Workspace) -> Result<Project> {
    Ok(workspace
        .store()
        .active()?
        .ok_or(StoreError::NoActiveProject)?)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Prints the computed schedule with slack annotations
pub fn schedule(workspace: &Workspace, out: &Output) -> Result<()> {
    let project = active_project(workspace)?;
    let schedule = schedule_with_slack(&project.tasks, today())?;

    if out.is_json() {
        out.data(&schedule);
        return Ok(());
    }

    if schedule.is_empty() {
        out.line("No tasks to schedule.");
        return Ok(());
    }

    out.row(&["ID", "NAME", "START", "END", "SLACK", ""]);
    for entry in &schedule {
        let slack = entry
            .slack
            .map(|s| format!("{}d", s))
            .unwrap_or_else(|| "-".to_string());
        let marker = if entry.critical == Some(true) {
            "critical"
        } else {
            ""
        };
        out.row(&[
            &entry.task.id,
            &entry.task.name,
            &entry.start.to_string(),
            &entry.end.to_string(),
            &slack,
            marker,
        ]);
    }
    Ok(())
}

/// Prints the critical path task identifiers
pub fn critical(workspace: &Workspace, out: &Output) -> Result<()> {
    let project = active_project(workspace)?;

    let mut path: Vec<String> = critical_path(&project.tasks)?.into_iter().collect();
    path.sort();

    if out.is_json() {
        out.data(&path);
        return Ok(());
    }

    if path.is_empty() {
        out.line("No tasks, no critical path.");
    } else {
        out.line(&path.join(" -> "));
    }
    Ok(())
}

/// Prints plan issues and health recommendations
pub fn doctor(workspace: &Workspace, out: &Output) -> Result<()> {
    let project = active_project(workspace)?;

    let issues = validate_tasks(&project.tasks);
    let recommendations = diagnose(&project)?;

    if out.is_json() {
        let issues: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
        out.data(&serde_json::json!({
            "issues": issues,
            "recommendations": recommendations,
        }));
        return Ok(());
    }

    for issue in &issues {
        out.line(&format!("! {}", issue));
    }
    for recommendation in &recommendations {
        out.line(&format!("- {}", recommendation));
    }
    Ok(())
}

/// Prints project health against the deadline
pub fn status(workspace: &Workspace, out: &Output) -> Result<()> {
    let project = active_project(workspace)?;
    let report = project_status(&project, today())?;

    if out.is_json() {
        out.data(&report);
        return Ok(());
    }

    out.line(&format!("[{}] {}", report.classification, report.message));
    if out.is_verbose() {
        for entry in &report.schedule {
            out.row(&[
                &entry.task.id,
                &entry.start.to_string(),
                &entry.end.to_string(),
            ]);
        }
    }
    Ok(())
}
