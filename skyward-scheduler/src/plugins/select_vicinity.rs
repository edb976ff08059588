/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Candidate selection over geographic and orbital vicinity.
//!
//! Instead of scoring the whole fleet, candidates are drawn from the
//! surroundings of the task's first predecessor: data gravity keeps
//! successor tasks close to where their input was produced. Each layer has
//! its own geodesic radius and candidate budget.

use std::rc::Rc;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{AvailableNodesIndexed, Location, ModelError, SharedNode, Task};
use crate::pipeline::{CandidateNodes, SchedulingContext, SelectCandidateNodesPlugin};
use crate::scheduler::SchedulerError;
use crate::util::great_circle_distance_km;

/// Radii and per-layer candidate budgets of the vicinity search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VicinityConfig {
    pub radius_ground_km: f64,
    pub radius_edge_km: f64,
    pub radius_space_km: f64,
    pub ground_nodes_count: usize,
    pub edge_nodes_count: usize,
    pub space_nodes_count: usize,
}

impl Default for VicinityConfig {
    fn default() -> Self {
        Self {
            radius_ground_km: 500.0,
            radius_edge_km: 100.0,
            radius_space_km: 1000.0,
            ground_nodes_count: 2,
            edge_nodes_count: 2,
            space_nodes_count: 10,
        }
    }
}

/// Selects up to K candidates per layer within geodesic radii of a
/// reference location.
///
/// The reference location is the placement of the task's first predecessor.
/// Tasks without a predecessor fall back to seeded-random picks per layer,
/// so workflow start tasks can still be scheduled anywhere.
pub struct SelectNodesInVicinityPlugin {
    config: VicinityConfig,
    rng: StdRng,
}

impl SelectNodesInVicinityPlugin {
    pub fn new(config: VicinityConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &VicinityConfig {
        &self.config
    }

    /// Placement location of the task's first predecessor, `None` when the
    /// task has no predecessor.
    ///
    /// # Errors
    /// A predecessor that exists but has no successful placement is an
    /// invariant violation — successors are only ever scheduled after their
    /// predecessors.
    fn reference_location(
        &self,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<Option<Location>, SchedulerError> {
        let Some(pred) = ctx.workflow.predecessors(&task.name).first() else {
            return Ok(None);
        };

        let placement = ctx.workflow.placement(pred).flatten().ok_or_else(|| {
            ModelError::UnscheduledPredecessor {
                task: task.name.clone(),
                predecessor: pred.clone(),
            }
        })?;

        // Terrestrial nodes carry a static location; a satellite's position
        // is a function of the current tick.
        let location = match placement.borrow().location() {
            Some(location) => location,
            None => ctx.orchestrator.satellite_position(&placement)?,
        };
        Ok(Some(location))
    }

    /// Adds up to `limit` nodes from `layer` whose static location is within
    /// `radius_km` of `reference`. Returns how many were added.
    fn add_terrestrial_within(
        out: &mut CandidateNodes,
        layer: &IndexMap<String, SharedNode>,
        reference: &Location,
        radius_km: f64,
        limit: usize,
    ) -> usize {
        let mut added = 0;
        for (name, node) in layer {
            if added == limit {
                break;
            }
            let Some(location) = node.borrow().location() else {
                continue;
            };
            if great_circle_distance_km(reference, &location) <= radius_km {
                out.insert(name.clone(), Rc::clone(node));
                added += 1;
            }
        }
        added
    }

    /// Adds up to `limit` satellites whose current position is within
    /// `radius_km` of `reference`.
    fn add_satellites_within(
        out: &mut CandidateNodes,
        layer: &IndexMap<String, SharedNode>,
        reference: &Location,
        radius_km: f64,
        limit: usize,
        ctx: &SchedulingContext<'_>,
    ) -> Result<usize, SchedulerError> {
        let mut added = 0;
        for (name, node) in layer {
            if added == limit {
                break;
            }
            let position = ctx.orchestrator.satellite_position(node)?;
            if great_circle_distance_km(reference, &position) <= radius_km {
                out.insert(name.clone(), Rc::clone(node));
                added += 1;
            }
        }
        Ok(added)
    }

    /// Adds up to `limit` uniformly chosen nodes from `layer`. Returns how
    /// many were added.
    fn add_random(
        &mut self,
        out: &mut CandidateNodes,
        layer: &IndexMap<String, SharedNode>,
        limit: usize,
    ) -> usize {
        if limit == 0 || layer.is_empty() {
            return 0;
        }
        let indices: Vec<usize> = (0..layer.len()).collect();
        let mut added = 0;
        for &idx in indices.choose_multiple(&mut self.rng, limit.min(layer.len())) {
            if let Some((name, node)) = layer.get_index(idx) {
                out.insert(name.clone(), Rc::clone(node));
                added += 1;
            }
        }
        added
    }

    fn select_near(
        &self,
        reference: &Location,
        all_nodes: &AvailableNodesIndexed,
        ctx: &SchedulingContext<'_>,
    ) -> Result<CandidateNodes, SchedulerError> {
        let cfg = &self.config;
        let mut candidates = CandidateNodes::new();

        // Ground layer, padded from the cloud when the area is sparse.
        let ground_added = Self::add_terrestrial_within(
            &mut candidates,
            &all_nodes.ground_stations,
            reference,
            cfg.radius_ground_km,
            cfg.ground_nodes_count,
        );
        if ground_added < cfg.ground_nodes_count {
            Self::add_terrestrial_within(
                &mut candidates,
                &all_nodes.cloud_nodes,
                reference,
                cfg.radius_ground_km,
                cfg.ground_nodes_count - ground_added,
            );
        }

        Self::add_terrestrial_within(
            &mut candidates,
            &all_nodes.edge_nodes,
            reference,
            cfg.radius_edge_km,
            cfg.edge_nodes_count,
        );

        Self::add_satellites_within(
            &mut candidates,
            &all_nodes.satellites,
            reference,
            cfg.radius_space_km,
            cfg.space_nodes_count,
            ctx,
        )?;

        Ok(candidates)
    }

    fn select_random(&mut self, all_nodes: &AvailableNodesIndexed) -> CandidateNodes {
        let cfg = self.config;
        let mut candidates = CandidateNodes::new();

        let ground_added =
            self.add_random(&mut candidates, &all_nodes.ground_stations, cfg.ground_nodes_count);
        if ground_added < cfg.ground_nodes_count {
            self.add_random(
                &mut candidates,
                &all_nodes.cloud_nodes,
                cfg.ground_nodes_count - ground_added,
            );
        }
        self.add_random(&mut candidates, &all_nodes.edge_nodes, cfg.edge_nodes_count);
        self.add_random(&mut candidates, &all_nodes.satellites, cfg.space_nodes_count);
        candidates
    }
}

impl SelectCandidateNodesPlugin for SelectNodesInVicinityPlugin {
    fn select_candidates(
        &mut self,
        task: &Task,
        all_nodes: &AvailableNodesIndexed,
        ctx: &SchedulingContext<'_>,
    ) -> Result<Option<CandidateNodes>, SchedulerError> {
        let candidates = match self.reference_location(task, ctx)? {
            Some(reference) => self.select_near(&reference, all_nodes, ctx)?,
            None => self.select_random(all_nodes),
        };

        debug!(
            task = %task.name,
            candidates = candidates.len(),
            "vicinity selection finished"
        );
        Ok(Some(candidates))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
