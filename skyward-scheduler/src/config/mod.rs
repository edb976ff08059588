/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Plugin-set presets and scheduler tuning files.
//!
//! The expected YAML structure of a tuning file is:
//! ```yaml
//! vicinity:
//!   radius_ground_km: 500.0
//!   radius_edge_km: 100.0
//!   radius_space_km: 1000.0
//!   ground_nodes_count: 2
//!   edge_nodes_count: 2
//!   space_nodes_count: 10
//! ```
//! Missing fields fall back to their defaults, so partial files are fine.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::orchestrator::OrchestratorClient;
use crate::pipeline::{CommitPlugin, FilterPlugin, ScorePlugin, SelectCandidateNodesPlugin};
use crate::plugins::baseline::{
    FirstFitPlugin, RandomSelectionPlugin, RoundRobinPlugin, SelectAllNodesPlugin,
};
use crate::plugins::{
    HeatOptPlugin, MultiCommitPlugin, NetworkQosPlugin, ResourcesFitPlugin,
    SelectNodesInVicinityPlugin, VicinityConfig,
};
use crate::scheduler::SchedulerConfig;

// ── Tuning file ───────────────────────────────────────────────────────────────

/// Tunable knobs loaded from a YAML file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulerTuning {
    pub vicinity: VicinityConfig,
}

/// Parses a tuning file.
///
/// # Errors
/// Returns an error if the file cannot be opened or the YAML is
/// structurally invalid.
pub fn load_tuning(path: &Path) -> Result<SchedulerTuning> {
    info!("Loading scheduler tuning from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open tuning file: {}", path.display()))?;
    let tuning: SchedulerTuning = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;
    Ok(tuning)
}

// ── Plugin presets ────────────────────────────────────────────────────────────

/// An assembled plugin chain, still missing the orchestrator binding.
pub struct SchedulerPlugins {
    pub select_candidate_nodes_plugin: Box<dyn SelectCandidateNodesPlugin>,
    pub filter_plugins: Vec<Box<dyn FilterPlugin>>,
    pub score_plugins: Vec<Box<dyn ScorePlugin>>,
    pub commit_plugin: Box<dyn CommitPlugin>,
}

impl SchedulerPlugins {
    /// Binds the plugin chain to an orchestrator, yielding a complete
    /// [`SchedulerConfig`].
    pub fn into_config(self, orchestrator_client: Rc<dyn OrchestratorClient>) -> SchedulerConfig {
        SchedulerConfig {
            select_candidate_nodes_plugin: self.select_candidate_nodes_plugin,
            filter_plugins: self.filter_plugins,
            score_plugins: self.score_plugins,
            commit_plugin: self.commit_plugin,
            orchestrator_client,
        }
    }
}

/// The full SLO- and thermal-aware pipeline: vicinity selection, resource
/// and latency filters, latency and heat scores, multi-attempt commit.
pub fn slo_aware_plugins(vicinity: VicinityConfig, seed: u64) -> SchedulerPlugins {
    SchedulerPlugins {
        select_candidate_nodes_plugin: Box::new(SelectNodesInVicinityPlugin::new(vicinity, seed)),
        filter_plugins: vec![
            Box::new(ResourcesFitPlugin::new()),
            Box::new(NetworkQosPlugin::new()),
        ],
        score_plugins: vec![
            Box::new(NetworkQosPlugin::new()),
            Box::new(HeatOptPlugin::new()),
        ],
        commit_plugin: Box::new(MultiCommitPlugin::new()),
    }
}

/// Greedy first-fit baseline over the whole fleet.
pub fn first_fit_plugins() -> SchedulerPlugins {
    SchedulerPlugins {
        select_candidate_nodes_plugin: Box::new(SelectAllNodesPlugin::new()),
        filter_plugins: vec![Box::new(ResourcesFitPlugin::new())],
        score_plugins: vec![Box::new(FirstFitPlugin::new())],
        commit_plugin: Box::new(MultiCommitPlugin::new()),
    }
}

/// Random-placement baseline over the whole fleet.
pub fn random_plugins(seed: u64) -> SchedulerPlugins {
    SchedulerPlugins {
        select_candidate_nodes_plugin: Box::new(SelectAllNodesPlugin::new()),
        filter_plugins: vec![Box::new(ResourcesFitPlugin::new())],
        score_plugins: vec![Box::new(RandomSelectionPlugin::new(seed))],
        commit_plugin: Box::new(MultiCommitPlugin::new()),
    }
}

/// Round-robin baseline over the whole fleet of `total_nodes` nodes.
pub fn round_robin_plugins(total_nodes: usize) -> SchedulerPlugins {
    SchedulerPlugins {
        select_candidate_nodes_plugin: Box::new(SelectAllNodesPlugin::new()),
        filter_plugins: vec![Box::new(ResourcesFitPlugin::new())],
        score_plugins: vec![Box::new(RoundRobinPlugin::new(total_nodes))],
        commit_plugin: Box::new(MultiCommitPlugin::new()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
