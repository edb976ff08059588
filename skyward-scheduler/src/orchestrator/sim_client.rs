/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Orchestrator client backed by an orbital network simulation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::model::{Location, SharedNode, Task};
use crate::scheduler::SchedulerError;

use super::graph::NetworkGraph;
use super::nodes::NodesManager;
use super::time::SimTimeService;
use super::OrchestratorClient;

/// The data the orbital simulation must supply, indexed by tick.
///
/// Node `i` of the matrix/position list is the fleet node named `i`;
/// satellites occupy the leading indices, terrestrial nodes follow.
pub trait ConstellationDataSource {
    /// Symmetric N×N delay matrix in milliseconds for `tick`. A zero entry
    /// means "no link".
    fn delay_matrix(&self, tick: i64) -> Vec<Vec<f64>>;

    /// Position of every constellation node at `tick`, indexed by integer
    /// node name.
    fn positions(&self, tick: i64) -> Vec<Location>;
}

struct PositionsCache {
    tick: i64,
    positions: Vec<Location>,
}

/// [`OrchestratorClient`] implementation that serves latency and position
/// queries from a [`ConstellationDataSource`] snapshot.
///
/// Both the network graph and the satellite positions are cached per tick
/// and refreshed lazily when the shared clock has advanced, so every
/// decision within one tick observes one consistent snapshot.
pub struct SimOrchestratorClient {
    nodes_mgr: NodesManager,
    source: Box<dyn ConstellationDataSource>,
    time_svc: Rc<SimTimeService>,
    network_graph: RefCell<NetworkGraph>,
    sat_positions: RefCell<PositionsCache>,
}

impl SimOrchestratorClient {
    pub fn new(
        nodes_mgr: NodesManager,
        source: Box<dyn ConstellationDataSource>,
        time_svc: Rc<SimTimeService>,
    ) -> Self {
        let node_count = nodes_mgr.all_nodes().len();
        Self {
            nodes_mgr,
            source,
            time_svc,
            network_graph: RefCell::new(NetworkGraph::new(node_count)),
            sat_positions: RefCell::new(PositionsCache {
                tick: -1,
                positions: Vec::new(),
            }),
        }
    }

    /// Rebuilds the network graph for the current tick if it is stale.
    ///
    /// Scenario drivers call this before timing a `schedule` run so that
    /// reading the delay matrix does not bias the measured duration.
    pub fn refresh_network_graph(&self) {
        let tick = self.time_svc.curr_time();
        let mut graph = self.network_graph.borrow_mut();
        if graph.is_stale(tick) {
            let delays = self.source.delay_matrix(tick);
            graph.refresh(tick, &delays);
        }
    }

    /// The latency graph for the current tick, rebuilt first if needed.
    pub fn network_graph(&self) -> std::cell::Ref<'_, NetworkGraph> {
        self.refresh_network_graph();
        self.network_graph.borrow()
    }

    fn refresh_sat_positions(&self) {
        let tick = self.time_svc.curr_time();
        let mut cache = self.sat_positions.borrow_mut();
        if cache.tick != tick {
            cache.positions = self.source.positions(tick);
            cache.tick = tick;
        }
    }

    /// Integer name of a node; fleet nodes served by a simulation are named
    /// after their matrix index.
    fn matrix_index(node: &SharedNode) -> Option<usize> {
        node.borrow().name.parse().ok()
    }
}

impl OrchestratorClient for SimOrchestratorClient {
    fn lookup(&self, name: &str) -> Option<SharedNode> {
        self.nodes_mgr.get_node_by_name(name)
    }

    fn latency(&self, src: &SharedNode, dst: &SharedNode) -> f64 {
        self.refresh_network_graph();

        let (Some(src_idx), Some(dst_idx)) = (Self::matrix_index(src), Self::matrix_index(dst))
        else {
            warn!(
                src = %src.borrow().name,
                dst = %dst.borrow().name,
                "node without integer name in latency query, treating as unreachable"
            );
            return -1.0;
        };
        self.network_graph.borrow().latency(src_idx, dst_idx)
    }

    fn satellite_position(&self, node: &SharedNode) -> Result<Location, SchedulerError> {
        if !node.borrow().is_satellite() {
            return Err(SchedulerError::NotASatellite {
                node: node.borrow().name.clone(),
            });
        }
        self.refresh_sat_positions();

        let tick = self.time_svc.curr_time();
        let cache = self.sat_positions.borrow();
        Self::matrix_index(node)
            .and_then(|idx| cache.positions.get(idx).copied())
            .ok_or_else(|| SchedulerError::MissingSatellitePosition {
                node: node.borrow().name.clone(),
                tick,
            })
    }

    fn assign(&self, task: &Task, node: &SharedNode) -> bool {
        self.nodes_mgr.assign_task(task, node)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
