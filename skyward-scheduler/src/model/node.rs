/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Compute nodes of the 3D continuum.
//!
//! The fleet spans four layers: cloud, ground stations, edge devices, and
//! LEO satellites. All variants share an attribute block (name, free
//! resources, capacity snapshot, CPU architecture); the terrestrial variants
//! carry a fixed [`Location`] while satellites carry [`HeatInfo`] and have
//! their position queried from the orchestrator at the current tick.
//!
//! # Ownership model
//! A node is created once per experiment and then shared between the fleet
//! directory, the scheduler's layered index, and workflow placements.
//! [`SharedNode`] (`Rc<RefCell<Node>>`) models this: the scheduling loop is
//! single-threaded cooperative, so a `borrow_mut` inside the orchestrator's
//! `assign` primitive is indivisible with respect to a single node.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::resources::{CpuArchitecture, ResourceMap};

// ── Location ──────────────────────────────────────────────────────────────────

/// A geographic position. `altitude_km` is 0 for ground-based nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub long: f64,
    pub altitude_km: f64,
}

impl Location {
    /// A position on the ground (altitude 0).
    pub fn ground(lat: f64, long: f64) -> Self {
        Self {
            lat,
            long,
            altitude_km: 0.0,
        }
    }
}

// ── HeatInfo ──────────────────────────────────────────────────────────────────

/// Thermal state and characteristics of a satellite. All values in °C
/// (rates in °C per minute).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatInfo {
    /// Current internal temperature.
    pub temperature_c: f64,
    /// Temperature at which the hardware must shut down.
    pub max_temp_c: f64,
    /// Temperature the satellite should stay below during normal operation.
    pub recommended_high_temp_c: f64,
    /// Heating caused by one full CPU core busy for one minute.
    pub temp_inc_per_cpu_minute_c: f64,
    /// Passive cooling radiated away per minute.
    pub radiated_heat_per_minute_c: f64,
    /// Mocked worst-case baseline temperature from orbital sun exposure.
    pub mocked_max_orbit_base_temp_c: f64,
}

// ── Node variants ─────────────────────────────────────────────────────────────

/// Discriminant tag for the node variants. The string form is what scenario
/// drivers and result CSVs see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Cloud,
    GroundStation,
    Edge,
    Satellite,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Cloud => "CloudNode",
            NodeType::GroundStation => "GroundStationNode",
            NodeType::Edge => "EdgeNode",
            NodeType::Satellite => "SatelliteNode",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific data. Terrestrial nodes have a fixed location; a
/// satellite's position is a function of the current tick and lives with the
/// orchestrator instead.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Cloud { location: Location },
    GroundStation { location: Location },
    Edge { location: Location },
    Satellite { heat: HeatInfo },
}

/// A compute node of the continuum.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique name within the fleet. Simulation-backed fleets use the
    /// stringified matrix index of the node as its name.
    pub name: String,

    /// Currently free resources. Decremented by the orchestrator's `assign`.
    pub resources: ResourceMap,

    /// Total capacity snapshot (free + used), fixed at construction.
    capacity: ResourceMap,

    /// CPU architecture of this node.
    pub cpu_arch: CpuArchitecture,

    kind: NodeKind,
}

impl Node {
    fn new(
        name: impl Into<String>,
        resources: ResourceMap,
        cpu_arch: CpuArchitecture,
        kind: NodeKind,
    ) -> Self {
        let capacity = resources.clone();
        Self {
            name: name.into(),
            resources,
            capacity,
            cpu_arch,
            kind,
        }
    }

    pub fn cloud(
        name: impl Into<String>,
        resources: ResourceMap,
        cpu_arch: CpuArchitecture,
        location: Location,
    ) -> Self {
        Self::new(name, resources, cpu_arch, NodeKind::Cloud { location })
    }

    pub fn ground_station(
        name: impl Into<String>,
        resources: ResourceMap,
        cpu_arch: CpuArchitecture,
        location: Location,
    ) -> Self {
        Self::new(name, resources, cpu_arch, NodeKind::GroundStation { location })
    }

    pub fn edge(
        name: impl Into<String>,
        resources: ResourceMap,
        cpu_arch: CpuArchitecture,
        location: Location,
    ) -> Self {
        Self::new(name, resources, cpu_arch, NodeKind::Edge { location })
    }

    pub fn satellite(
        name: impl Into<String>,
        resources: ResourceMap,
        cpu_arch: CpuArchitecture,
        heat: HeatInfo,
    ) -> Self {
        Self::new(name, resources, cpu_arch, NodeKind::Satellite { heat })
    }

    /// Variant tag of this node.
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Cloud { .. } => NodeType::Cloud,
            NodeKind::GroundStation { .. } => NodeType::GroundStation,
            NodeKind::Edge { .. } => NodeType::Edge,
            NodeKind::Satellite { .. } => NodeType::Satellite,
        }
    }

    pub fn is_satellite(&self) -> bool {
        matches!(self.kind, NodeKind::Satellite { .. })
    }

    /// Static location. `None` for satellites — their position must be
    /// queried from the orchestrator at the current tick.
    pub fn location(&self) -> Option<Location> {
        match self.kind {
            NodeKind::Cloud { location }
            | NodeKind::GroundStation { location }
            | NodeKind::Edge { location } => Some(location),
            NodeKind::Satellite { .. } => None,
        }
    }

    /// Thermal state. `None` for terrestrial nodes.
    pub fn heat_info(&self) -> Option<&HeatInfo> {
        match &self.kind {
            NodeKind::Satellite { heat } => Some(heat),
            _ => None,
        }
    }

    /// Total resource capacity (free + used) fixed at construction.
    pub fn capacity(&self) -> &ResourceMap {
        &self.capacity
    }

    /// Free quantity of `kind`, 0 if the node does not carry it.
    pub fn free(&self, kind: super::resources::ResourceKind) -> i64 {
        self.resources.get(&kind).copied().unwrap_or(0)
    }

    /// Wrap this node for sharing between the directory, the scheduler, and
    /// workflow placements.
    pub fn into_shared(self) -> SharedNode {
        Rc::new(RefCell::new(self))
    }
}

/// A node shared across the fleet directory, scheduler, and placements.
pub type SharedNode = Rc<RefCell<Node>>;

// ── Fleet collections ─────────────────────────────────────────────────────────

/// The fleet, layer by layer, in generation order.
#[derive(Debug, Clone, Default)]
pub struct AvailableNodes {
    pub cloud_nodes: Vec<SharedNode>,
    pub ground_stations: Vec<SharedNode>,
    pub edge_nodes: Vec<SharedNode>,
    pub satellites: Vec<SharedNode>,
}

/// The fleet indexed by node name within each layer.
///
/// `IndexMap` keeps insertion order — candidate selection and the default
/// full-fleet iteration depend on a stable order for reproducible tie-breaks.
#[derive(Debug, Clone, Default)]
pub struct AvailableNodesIndexed {
    pub cloud_nodes: IndexMap<String, SharedNode>,
    pub ground_stations: IndexMap<String, SharedNode>,
    pub edge_nodes: IndexMap<String, SharedNode>,
    pub satellites: IndexMap<String, SharedNode>,
}

fn index_nodes(nodes: &[SharedNode]) -> IndexMap<String, SharedNode> {
    nodes
        .iter()
        .map(|n| (n.borrow().name.clone(), Rc::clone(n)))
        .collect()
}

impl AvailableNodesIndexed {
    pub fn from_nodes(nodes: &AvailableNodes) -> Self {
        Self {
            cloud_nodes: index_nodes(&nodes.cloud_nodes),
            ground_stations: index_nodes(&nodes.ground_stations),
            edge_nodes: index_nodes(&nodes.edge_nodes),
            satellites: index_nodes(&nodes.satellites),
        }
    }

    /// Total number of nodes across all layers.
    pub fn len(&self) -> usize {
        self.cloud_nodes.len()
            + self.ground_stations.len()
            + self.edge_nodes.len()
            + self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── NodeScore ─────────────────────────────────────────────────────────────────

/// A node together with the raw or normalised score a plugin gave it.
#[derive(Debug, Clone)]
pub struct NodeScore {
    pub node: SharedNode,
    pub score: i64,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
