//! JSON storage for projects
//!
//! All projects live in a single JSON document (`.pulse/projects.json`)
//! together with the active-project pointer. Uses file locking for
//! concurrent access safety; writes go through a temp file and an atomic
//! rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Project, ProjectId, Task};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("No active project. Create one with 'pulse project new' first.")]
    NoActiveProject,

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),
}

/// On-disk document: the active-project pointer plus all projects
#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    active_project_id: Option<ProjectId>,

    #[serde(default)]
    projects: Vec<Project>,
}

/// Store for project data in a single JSON document
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Creates a new project store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a workspace
    pub fn for_workspace(root: &Path) -> Self {
        Self::new(root.join(".pulse").join("projects.json"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<DataFile> {
        if !self.path.exists() {
            return Ok(DataFile::default());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open project store: {}", self.path.display()))?;

        // Shared lock for reading; released when the file is dropped
        file.lock_shared()
            .context("Failed to acquire read lock on project store")?;

        let reader = BufReader::new(&file);
        let data = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse project store: {}", self.path.display()))?;

        Ok(data)
    }

    fn write(&self, data: &DataFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on project store")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, data)
                .context("Failed to serialize project store")?;
            writer.flush().context("Failed to flush project store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Reads all projects
    pub fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.read()?.projects)
    }

    /// Looks up a project by identifier
    pub fn get(&self, id: &ProjectId) -> Result<Option<Project>> {
        Ok(self.read()?.projects.into_iter().find(|p| &p.id == id))
    }

    /// Adds a project and makes it the active one
    pub fn create(&self, project: Project) -> Result<Project> {
        let mut data = self.read()?;
        data.active_project_id = Some(project.id.clone());
        data.projects.push(project.clone());
        self.write(&data)?;
        Ok(project)
    }

    /// Returns the active project, if any
    pub fn active(&self) -> Result<Option<Project>> {
        let data = self.read()?;
        let Some(active_id) = data.active_project_id else {
            return Ok(None);
        };
        Ok(data.projects.into_iter().find(|p| p.id == active_id))
    }

    /// Returns the identifier of the active project, if any
    pub fn active_id(&self) -> Result<Option<ProjectId>> {
        Ok(self.read()?.active_project_id)
    }

    /// Switches the active project
    pub fn set_active(&self, id: &ProjectId) -> Result<Project> {
        let mut data = self.read()?;
        let project = data
            .projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))?;

        data.active_project_id = Some(id.clone());
        self.write(&data)?;
        Ok(project)
    }

    /// Replaces a project's task list
    pub fn save_tasks(&self, id: &ProjectId, tasks: Vec<Task>) -> Result<Project> {
        let mut data = self.read()?;
        let project = data
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))?;

        project.tasks = tasks;
        let updated = project.clone();
        self.write(&data)?;
        Ok(updated)
    }

    /// Marks a task done on the active project
    pub fn mark_done(&self, task_id: &str) -> Result<Task> {
        self.update_active_task(task_id, |task| task.complete())
    }

    /// Records additional delay against a task on the active project
    pub fn add_delay(&self, task_id: &str, days: u32) -> Result<Task> {
        self.update_active_task(task_id, |task| task.add_delay(days))
    }

    fn update_active_task<F>(&self, task_id: &str, update: F) -> Result<Task>
    where
        F: FnOnce(&mut Task),
    {
        let mut data = self.read()?;
        let active_id = data
            .active_project_id
            .clone()
            .ok_or(StoreError::NoActiveProject)?;

        let project = data
            .projects
            .iter_mut()
            .find(|p| p.id == active_id)
            .ok_or_else(|| StoreError::ProjectNotFound(active_id.to_string()))?;

        let task = project
            .task_mut(task_id)
            .ok_or_else(|| StoreError::TaskNotFound(task_id.to_string()))?;

        update(task);
        let updated = task.clone();

        self.write(&data)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ProjectStore {
        ProjectStore::new(dir.path().join("projects.json"))
    }

    #[test]
    fn read_missing_store_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.projects().unwrap().is_empty());
        assert!(store.active().unwrap().is_none());
    }

    #[test]
    fn create_makes_project_active() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let project = store.create(Project::new("Launch")).unwrap();

        let active = store.active().unwrap().unwrap();
        assert_eq!(active.id, project.id);
        assert_eq!(active.name, "Launch");
    }

    #[test]
    fn second_create_switches_active() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.create(Project::new("First")).unwrap();
        let second = store.create(Project::new("Second")).unwrap();

        assert_eq!(store.active().unwrap().unwrap().id, second.id);
        assert_eq!(store.projects().unwrap().len(), 2);
    }

    #[test]
    fn set_active_switches_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.create(Project::new("First")).unwrap();
        store.create(Project::new("Second")).unwrap();

        store.set_active(&first.id).unwrap();
        assert_eq!(store.active().unwrap().unwrap().id, first.id);
    }

    #[test]
    fn set_active_unknown_project_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let other = Project::new("Elsewhere");
        assert!(store.set_active(&other.id).is_err());
    }

    #[test]
    fn save_tasks_replaces_the_list() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let project = store.create(Project::new("Launch")).unwrap();
        let updated = store
            .save_tasks(&project.id, vec![Task::new("t1", "Scope")])
            .unwrap();

        assert_eq!(updated.tasks.len(), 1);
        assert_eq!(store.active().unwrap().unwrap().tasks.len(), 1);
    }

    #[test]
    fn mark_done_updates_the_task() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let project = store.create(Project::new("Launch")).unwrap();
        store
            .save_tasks(&project.id, vec![Task::new("t1", "Scope")])
            .unwrap();

        let task = store.mark_done("t1").unwrap();
        assert_eq!(task.status, TaskStatus::Done);

        let reloaded = store.active().unwrap().unwrap();
        assert!(reloaded.task("t1").unwrap().status.is_done());
    }

    #[test]
    fn add_delay_accumulates() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let project = store.create(Project::new("Launch")).unwrap();
        store
            .save_tasks(&project.id, vec![Task::new("t1", "Scope")])
            .unwrap();

        store.add_delay("t1", 2).unwrap();
        let task = store.add_delay("t1", 3).unwrap();
        assert_eq!(task.delay_days, 5);
    }

    #[test]
    fn task_ops_without_active_project_fail() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.mark_done("t1").is_err());
        assert!(store.add_delay("t1", 1).is_err());
    }

    #[test]
    fn unknown_task_fails() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.create(Project::new("Launch")).unwrap();
        assert!(store.mark_done("ghost").is_err());
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.create(Project::new("Launch")).unwrap();

        let temp_path = store.path().with_extension("json.tmp");
        assert!(!temp_path.exists());
        assert!(store.path().exists());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ProjectStore::new(dir.path().join("nested").join("projects.json"));

        store.create(Project::new("Launch")).unwrap();
        assert!(store.path().exists());
    }
}
