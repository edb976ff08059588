/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The workflow DAG.
//!
//! Vertices are [`Task`]s, edges carry an optional [`NetworkSLO`] describing
//! the link from predecessor to successor. Tasks are owned by the workflow
//! and referenced by name everywhere else; adjacency is kept as predecessor
//! and successor lists for O(deg) queries.
//!
//! Acyclicity is by construction: an edge may only point from an
//! already-added task to the task being added.

use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;

use super::error::ModelError;
use super::node::SharedNode;
use super::slos::NetworkSLO;
use super::task::Task;

/// Declares one incoming edge of a task being added to a workflow.
#[derive(Debug, Clone)]
pub struct PredecessorConfig {
    pub predecessor: String,
    pub slo: Option<NetworkSLO>,
}

impl PredecessorConfig {
    pub fn new(predecessor: impl Into<String>, slo: NetworkSLO) -> Self {
        Self {
            predecessor: predecessor.into(),
            slo: Some(slo),
        }
    }

    /// An edge without any SLO attached.
    pub fn unconstrained(predecessor: impl Into<String>) -> Self {
        Self {
            predecessor: predecessor.into(),
            slo: None,
        }
    }
}

/// A directed acyclic workflow of tasks with SLO-typed edges.
#[derive(Debug, Default)]
pub struct Workflow {
    tasks: IndexMap<String, Task>,
    start: Option<String>,
    preds: HashMap<String, Vec<String>>,
    succs: HashMap<String, Vec<String>>,
    edge_slos: HashMap<(String, String), Option<NetworkSLO>>,
    /// Placement per task name: `Some(node)` = scheduled, `None` = tried and
    /// failed. A task absent from this map has not been attempted yet.
    scheduled: HashMap<String, Option<SharedNode>>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task without predecessors. The first task added becomes the
    /// workflow's start task.
    pub fn add_task(&mut self, task: Task) -> Result<(), ModelError> {
        self.add_task_with_predecessors(task, Vec::new())
    }

    /// Adds a task with the given incoming edges.
    ///
    /// # Errors
    /// Rejects duplicate task names and edges referencing predecessors that
    /// have not been added yet.
    pub fn add_task_with_predecessors(
        &mut self,
        task: Task,
        predecessors: Vec<PredecessorConfig>,
    ) -> Result<(), ModelError> {
        let name = task.name.clone();
        if self.tasks.contains_key(&name) {
            return Err(ModelError::DuplicateTask { task: name });
        }
        for pred in &predecessors {
            if !self.tasks.contains_key(&pred.predecessor) {
                return Err(ModelError::UnknownPredecessor {
                    task: name,
                    predecessor: pred.predecessor.clone(),
                });
            }
        }

        if self.start.is_none() {
            self.start = Some(name.clone());
        }
        self.tasks.insert(name.clone(), task);

        for pred in predecessors {
            self.preds
                .entry(name.clone())
                .or_default()
                .push(pred.predecessor.clone());
            self.succs
                .entry(pred.predecessor.clone())
                .or_default()
                .push(name.clone());
            self.edge_slos
                .insert((pred.predecessor, name.clone()), pred.slo);
        }
        Ok(())
    }

    /// The first task that was added, if any.
    pub fn start(&self) -> Option<&Task> {
        self.start.as_ref().and_then(|name| self.tasks.get(name))
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn contains_task(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Predecessor names of `task`, in edge insertion order.
    pub fn predecessors(&self, task: &str) -> &[String] {
        self.preds.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Successor names of `task`, in edge insertion order.
    pub fn successors(&self, task: &str) -> &[String] {
        self.succs.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The SLO on the edge `(pred, succ)`, if the edge exists and carries one.
    pub fn edge_slo(&self, pred: &str, succ: &str) -> Option<NetworkSLO> {
        self.edge_slos
            .get(&(pred.to_string(), succ.to_string()))
            .copied()
            .flatten()
    }

    /// Placement of `task`: outer `None` = not attempted yet, `Some(None)` =
    /// tried and failed, `Some(Some(node))` = scheduled.
    pub fn placement(&self, task: &str) -> Option<Option<SharedNode>> {
        self.scheduled
            .get(task)
            .map(|p| p.as_ref().map(Rc::clone))
    }

    /// Records the scheduler's decision for `task` (`None` = failed).
    pub fn record_placement(&mut self, task: &str, node: Option<SharedNode>) {
        self.scheduled.insert(task.to_string(), node);
    }

    /// All placements recorded so far.
    pub fn scheduled_tasks(&self) -> &HashMap<String, Option<SharedNode>> {
        &self.scheduled
    }

    /// `(slo, predecessor, placement)` for every in-edge of `task` that
    /// carries an SLO. The placement is `None` when the predecessor has not
    /// been successfully scheduled.
    pub fn incoming_link_slos(&self, task: &str) -> Vec<(NetworkSLO, String, Option<SharedNode>)> {
        let mut out = Vec::new();
        for pred in self.predecessors(task) {
            if let Some(slo) = self.edge_slo(pred, task) {
                let placement = self.placement(pred).flatten();
                out.push((slo, pred.clone(), placement));
            }
        }
        out
    }

    /// `(slo, source node)` for every incoming SLO of `task`: predecessor
    /// edges first (source = the predecessor's assigned node), then the
    /// task's data-source SLOs.
    ///
    /// # Errors
    /// Fails if any predecessor with an SLO-carrying edge has no placement —
    /// scheduling a task before its predecessors is an invariant violation.
    pub fn all_incoming_slos(
        &self,
        task: &Task,
    ) -> Result<Vec<(NetworkSLO, SharedNode)>, ModelError> {
        let mut out = Vec::new();
        for (slo, pred, placement) in self.incoming_link_slos(&task.name) {
            let node = placement.ok_or_else(|| ModelError::UnscheduledPredecessor {
                task: task.name.clone(),
                predecessor: pred,
            })?;
            out.push((slo, node));
        }
        for ds in &task.data_source_slos {
            out.push((ds.slo, Rc::clone(&ds.data_source)));
        }
        Ok(out)
    }

    /// Replaces the data source of the SLO at `index` on `task`. Used by
    /// scenario drivers that pick the earth-observation satellite only once
    /// the surrounding tasks have been placed.
    pub fn set_data_source_node(
        &mut self,
        task: &str,
        index: usize,
        node: SharedNode,
    ) -> Result<(), ModelError> {
        let entry = self
            .tasks
            .get_mut(task)
            .ok_or_else(|| ModelError::UnknownTask {
                task: task.to_string(),
            })?;
        let slo = entry.data_source_slos.get_mut(index).ok_or_else(|| {
            ModelError::NoSuchDataSourceSlo {
                task: task.to_string(),
                index,
            }
        })?;
        slo.data_source = node;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
