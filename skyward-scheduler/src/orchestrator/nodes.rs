/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The fleet directory.

use std::rc::Rc;

use tracing::debug;

use crate::model::{AvailableNodesIndexed, SharedNode, Task};

/// Maintains a directory of all nodes, indexed by name across all layers,
/// and owns the atomic resource reservation primitive.
#[derive(Debug)]
pub struct NodesManager {
    all_nodes: AvailableNodesIndexed,
}

impl NodesManager {
    pub fn new(all_nodes: AvailableNodesIndexed) -> Self {
        Self { all_nodes }
    }

    pub fn all_nodes(&self) -> &AvailableNodesIndexed {
        &self.all_nodes
    }

    /// Gets a node using its name. Satellites are checked first — they are
    /// by far the largest layer in constellation fleets.
    pub fn get_node_by_name(&self, name: &str) -> Option<SharedNode> {
        self.all_nodes
            .satellites
            .get(name)
            .or_else(|| self.all_nodes.ground_stations.get(name))
            .or_else(|| self.all_nodes.edge_nodes.get(name))
            .or_else(|| self.all_nodes.cloud_nodes.get(name))
            .map(Rc::clone)
    }

    /// Reserves the task's required resources on `node` if every required
    /// quantity is available.
    ///
    /// The check and the decrement happen under one `borrow_mut`, so the
    /// reservation is indivisible with respect to this node: either all
    /// quantities are taken or none are.
    pub fn assign_task(&self, task: &Task, node: &SharedNode) -> bool {
        let mut node = node.borrow_mut();

        for (kind, req) in &task.req_resources {
            if node.free(*kind) < *req {
                debug!(
                    task = %task.name,
                    node = %node.name,
                    kind = kind.as_str(),
                    required = req,
                    free = node.free(*kind),
                    "reservation rejected"
                );
                return false;
            }
        }

        for (kind, req) in &task.req_resources {
            *node.resources.entry(*kind).or_insert(0) -= req;
        }
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
