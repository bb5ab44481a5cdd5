//! Project status reporting
//!
//! Combines the computed schedule with the project deadline to classify
//! overall health. The estimated finish is the end date of the last task in
//! input order, a positional convention callers rely on when the plan is
//! authored finish-last.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::graph::GraphError;
use super::project::Project;
use super::schedule::{compute_schedule, ScheduledTask};

/// Overall health classification of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectHealth {
    /// No tasks to schedule yet
    Unknown,
    /// Scheduled, but no deadline to compare against
    Ok,
    /// Estimated finish is on or before the deadline
    OnTrack,
    /// Estimated finish is after the deadline
    OffTrack,
}

impl std::fmt::Display for ProjectHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectHealth::Unknown => write!(f, "unknown"),
            ProjectHealth::Ok => write!(f, "ok"),
            ProjectHealth::OnTrack => write!(f, "on-track"),
            ProjectHealth::OffTrack => write!(f, "off-track"),
        }
    }
}

/// Health classification plus the schedule it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub classification: ProjectHealth,
    pub message: String,
    pub schedule: Vec<ScheduledTask>,
}

/// Classifies project health against its deadline, anchored to `today`
///
/// Fails with [`GraphError::CycleDetected`] when the dependency graph is
/// cyclic.
pub fn project_status(project: &Project, today: NaiveDate) -> Result<StatusReport, GraphError> {
    let schedule = compute_schedule(&project.tasks, today)?;

    let finish = schedule.last().map(|s| s.end);
    let Some(finish) = finish else {
        return Ok(StatusReport {
            classification: ProjectHealth::Unknown,
            message: "No tasks yet.".to_string(),
            schedule,
        });
    };

    let Some(deadline) = project.deadline else {
        return Ok(StatusReport {
            classification: ProjectHealth::Ok,
            message: format!("Estimated finish: {} (no deadline set).", finish),
            schedule,
        });
    };

    if finish <= deadline {
        Ok(StatusReport {
            classification: ProjectHealth::OnTrack,
            message: format!(
                "On track. Estimated finish {} before deadline {}.",
                finish, deadline
            ),
            schedule,
        })
    } else {
        Ok(StatusReport {
            classification: ProjectHealth::OffTrack,
            message: format!(
                "Off track. Estimated finish {} after deadline {}.",
                finish, deadline
            ),
            schedule,
        })
    }
}
