//! Dependency graph for tasks
//!
//! Builds the dependents index and topological ordering that the schedule
//! and critical-path computations run over. Uses petgraph for graph
//! operations.
//!
//! Dependencies naming a task that does not exist in the plan are skipped
//! when building edges: a dangling reference constrains nothing. Cycles are
//! a hard error surfaced through [`GraphError::CycleDetected`].

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use thiserror::Error;

use super::task::Task;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Dependency cycle detected involving task '{0}'")]
    CycleDetected(String),
}

/// A dependency graph over a project's task list
///
/// Edge direction is `dependency -> dependent`: an edge from `a` to `b`
/// means `a` must finish before `b` starts.
#[derive(Debug, Default)]
pub struct TaskGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Builds a graph from a task list
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for task in tasks {
            if !node_map.contains_key(&task.id) {
                let idx = graph.add_node(task.id.clone());
                node_map.insert(task.id.clone(), idx);
            }
        }

        for task in tasks {
            let Some(&task_idx) = node_map.get(&task.id) else {
                continue;
            };
            for dep in &task.depends_on {
                // Unknown dependency: no edge, no constraint
                if let Some(&dep_idx) = node_map.get(dep) {
                    graph.add_edge(dep_idx, task_idx, ());
                }
            }
        }

        Self { graph, node_map }
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, task_id: &str) -> bool {
        self.node_map.contains_key(task_id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns the direct dependencies of a task that resolve within the plan
    pub fn dependencies(&self, task_id: &str) -> Vec<&str> {
        self.neighbors(task_id, petgraph::Direction::Incoming)
    }

    /// Returns the direct dependents of a task (tasks that depend on it)
    pub fn dependents(&self, task_id: &str) -> Vec<&str> {
        self.neighbors(task_id, petgraph::Direction::Outgoing)
    }

    fn neighbors(&self, task_id: &str, dir: petgraph::Direction) -> Vec<&str> {
        let Some(&idx) = self.node_map.get(task_id) else {
            return Vec::new();
        };

        self.graph
            .neighbors_directed(idx, dir)
            .filter_map(|n| self.graph.node_weight(n).map(String::as_str))
            .collect()
    }

    /// Returns all task identifiers in topological order (dependencies
    /// before dependents)
    ///
    /// Fails with [`GraphError::CycleDetected`] when the dependency relation
    /// is not acyclic, naming one task on the cycle.
    pub fn topological_order(&self) -> Result<Vec<&str>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).map(String::as_str))
                .collect()),
            Err(cycle) => {
                let task_id = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_default();
                Err(GraphError::CycleDetected(task_id))
            }
        }
    }
}
