/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The per-tick network topology.
//!
//! Connectivity between orbiting satellites changes every simulated tick, so
//! the graph is rebuilt from the authoritative delay matrix whenever the
//! cached tick falls behind — partial updates could leave latency queries
//! inconsistent with the current snapshot.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

/// An undirected graph over the whole fleet with latency-weighted edges.
///
/// Vertices are the integer node names `0..N`; they double as indices into
/// the delay matrix supplied by the orbital simulator.
#[derive(Debug)]
pub struct NetworkGraph {
    graph: UnGraph<(), f64>,
    last_tick: i64,
}

impl NetworkGraph {
    /// An edgeless graph over `node_count` vertices. `refresh` must run
    /// before the first latency query.
    pub fn new(node_count: usize) -> Self {
        let mut graph = UnGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        Self {
            graph,
            last_tick: -1,
        }
    }

    /// Whether the cached topology belongs to an older tick than `tick`.
    pub fn is_stale(&self, tick: i64) -> bool {
        self.last_tick != tick
    }

    /// Rebuilds all edges from the symmetric delay matrix of `tick`.
    ///
    /// Only the upper triangle is read; a zero entry means "no edge".
    pub fn refresh(&mut self, tick: i64, delays: &[Vec<f64>]) {
        self.graph.clear_edges();

        let n = self.graph.node_count();
        for i in 0..n {
            for j in (i + 1)..n {
                let latency = delays
                    .get(i)
                    .and_then(|row| row.get(j))
                    .copied()
                    .unwrap_or(0.0);
                if latency != 0.0 {
                    self.graph
                        .add_edge(NodeIndex::new(i), NodeIndex::new(j), latency);
                }
            }
        }

        self.last_tick = tick;
        debug!(
            tick,
            edges = self.graph.edge_count(),
            nodes = n,
            "network graph rebuilt"
        );
    }

    /// Shortest-path latency between two vertices in milliseconds, `-1.0`
    /// iff no path exists.
    pub fn latency(&self, src: usize, dst: usize) -> f64 {
        let n = self.graph.node_count();
        if src >= n || dst >= n {
            return -1.0;
        }
        let dst = NodeIndex::new(dst);
        let costs = dijkstra(&self.graph, NodeIndex::new(src), Some(dst), |e| *e.weight());
        costs.get(&dst).copied().unwrap_or(-1.0)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn last_tick(&self) -> i64 {
        self.last_tick
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
