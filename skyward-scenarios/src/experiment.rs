/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Experiment assembly and the wildfire scheduling-quality scenario.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use tracing::info;

use skyward_scheduler::config::{self, SchedulerPlugins};
use skyward_scheduler::model::{AvailableNodes, AvailableNodesIndexed, Workflow};
use skyward_scheduler::orchestrator::{
    NodesManager, OrchestratorClient, SimOrchestratorClient, SimTimeService, SimulationAction,
};
use skyward_scheduler::plugins::VicinityConfig;
use skyward_scheduler::scheduler::{Scheduler, SchedulingResult};

use crate::constellation::{ConstellationConfig, SyntheticConstellation};
use crate::nodes_generator::NodesGenerator;
use crate::results::write_results_to_csv;
use crate::workflows::{self, INGEST, OBJECT_DET};

/// Which plugin set drives the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SchedulerKind {
    /// Vicinity selection + latency/thermal-aware scoring.
    SloAware,
    /// Greedy first-fit baseline.
    FirstFit,
    /// Seeded random baseline.
    Random,
    /// Round-robin baseline.
    RoundRobin,
}

/// Node counts per continuum layer.
#[derive(Debug, Clone, Copy)]
pub struct NodeCounts {
    pub satellites: usize,
    pub edge_nodes: usize,
    pub ground_stations: usize,
}

/// Everything one experiment run needs.
pub struct Experiment {
    pub time_svc: Rc<SimTimeService>,
    pub client: Rc<SimOrchestratorClient>,
    pub nodes: AvailableNodes,
    pub scheduler: Scheduler,
    pub total_nodes: usize,
}

/// Builds reproducible experiments: the same seed yields the same fleet,
/// the same constellation, and the same scheduling decisions.
pub struct ExperimentBuilder {
    seed: u64,
}

impl ExperimentBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn init_experiment(
        &self,
        counts: NodeCounts,
        duration: i64,
        vicinity: VicinityConfig,
        kind: SchedulerKind,
        edge_locs: &[(f64, f64)],
        gs_locs: &[(f64, f64)],
        edge_bounds: ((f64, f64), (f64, f64)),
        gs_bounds: ((f64, f64), (f64, f64)),
    ) -> Experiment {
        let mut nodes_gen = NodesGenerator::new(self.seed);

        let edge_locs = extend_locations(&mut nodes_gen, edge_locs, counts.edge_nodes, edge_bounds);
        let gs_locs =
            extend_locations(&mut nodes_gen, gs_locs, counts.ground_stations, gs_bounds);

        let nodes = nodes_gen.generate_nodes(counts.satellites, &edge_locs, &gs_locs);
        let total_nodes = counts.satellites + edge_locs.len() + gs_locs.len();

        let terrestrial = edge_locs
            .iter()
            .chain(gs_locs.iter())
            .map(|&(lat, long)| skyward_scheduler::model::Location::ground(lat, long))
            .collect();
        let constellation = SyntheticConstellation::new(
            counts.satellites,
            terrestrial,
            ConstellationConfig::default(),
        );

        let time_svc = Rc::new(SimTimeService::new(duration));
        let nodes_mgr = NodesManager::new(AvailableNodesIndexed::from_nodes(&nodes));
        let client = Rc::new(SimOrchestratorClient::new(
            nodes_mgr,
            Box::new(constellation),
            Rc::clone(&time_svc),
        ));

        let plugins = self.plugins_for(kind, vicinity, total_nodes);
        let orchestrator: Rc<dyn OrchestratorClient> = client.clone() as Rc<dyn OrchestratorClient>;
        let scheduler = Scheduler::new(plugins.into_config(orchestrator), &nodes);

        info!(
            satellites = counts.satellites,
            edge_nodes = edge_locs.len(),
            ground_stations = gs_locs.len(),
            duration,
            seed = self.seed,
            "experiment initialised"
        );

        Experiment {
            time_svc,
            client,
            nodes,
            scheduler,
            total_nodes,
        }
    }

    fn plugins_for(
        &self,
        kind: SchedulerKind,
        vicinity: VicinityConfig,
        total_nodes: usize,
    ) -> SchedulerPlugins {
        match kind {
            SchedulerKind::SloAware => config::slo_aware_plugins(vicinity, self.seed),
            SchedulerKind::FirstFit => config::first_fit_plugins(),
            SchedulerKind::Random => config::random_plugins(self.seed),
            SchedulerKind::RoundRobin => config::round_robin_plugins(total_nodes),
        }
    }
}

fn extend_locations(
    nodes_gen: &mut NodesGenerator,
    locs: &[(f64, f64)],
    total: usize,
    bounds: ((f64, f64), (f64, f64)),
) -> Vec<(f64, f64)> {
    let mut locs = locs.to_vec();
    if locs.len() < total {
        locs.extend(nodes_gen.generate_random_locations(total - locs.len(), bounds));
    }
    locs
}

// ── Wildfire scheduling-quality scenario ──────────────────────────────────────

/// Drones flying over Mendocino National Forest in California, an area
/// prone to wildfires.
const EDGE_LAT_LONG: [(f64, f64); 5] = [
    (39.493917, -122.981303),
    (39.525713, -123.000053),
    (39.424175, -122.923482),
    (39.590260, -122.987340),
    (39.530706, -123.102010),
];

/// ESA Redu (Belgium) and NASA White Sands (New Mexico).
const GS_LAT_LONG: [(f64, f64); 2] = [(50.002352, 5.148141), (32.500649, -106.608803)];

const EDGE_BOUNDS: ((f64, f64), (f64, f64)) = ((41.990495, -124.218537), (32.729169, -114.613391));
const GS_BOUNDS: ((f64, f64), (f64, f64)) = ((90.0, 180.0), (-90.0, -180.0));

struct RunState {
    scheduler: Scheduler,
    wf: Workflow,
    results: Vec<SchedulingResult>,
    last_task: String,
    error: Option<anyhow::Error>,
}

/// Runs the wildfire-detection scheduling-quality experiment and writes one
/// CSV row per scheduling decision.
///
/// The ingest task is force-scheduled onto the first drone before the
/// simulation starts; the remaining tasks are scheduled at fixed ticks
/// while the constellation moves underneath.
pub fn run_wildfire_quality_experiment(
    seed: u64,
    counts: NodeCounts,
    duration: i64,
    vicinity: VicinityConfig,
    kind: SchedulerKind,
    results_csv: &Path,
) -> Result<()> {
    let builder = ExperimentBuilder::new(seed);
    let mut experiment = builder.init_experiment(
        counts,
        duration,
        vicinity,
        kind,
        &EDGE_LAT_LONG,
        &GS_LAT_LONG,
        EDGE_BOUNDS,
        GS_BOUNDS,
    );

    // The constellation carries no dedicated EO spacecraft, so one of the
    // communication satellites doubles as the provisional data source; it
    // is replaced once extract-frames has been placed and the covering
    // satellites are known.
    let provisional_eo = experiment
        .nodes
        .satellites
        .last()
        .context("experiment fleet has no satellites")?;
    let mut wf = workflows::create_wildfire_detection_wf(provisional_eo)?;

    let drone = Rc::clone(&experiment.nodes.edge_nodes[0]);
    let seed_result = experiment.scheduler.force_schedule(INGEST, &mut wf, &drone)?;

    let satellites_count = experiment.nodes.satellites.len();
    let client = Rc::clone(&experiment.client);
    let state = RefCell::new(RunState {
        scheduler: experiment.scheduler,
        wf,
        results: vec![seed_result],
        last_task: INGEST.to_string(),
        error: None,
    });

    let schedule_next = |state: &RefCell<RunState>| -> Result<()> {
        // Refresh the graph outside the timed section so reading the delay
        // matrix does not bias the measured scheduling duration.
        client.refresh_network_graph();

        let run = &mut *state.borrow_mut();
        let next = run
            .wf
            .successors(&run.last_task)
            .first()
            .cloned()
            .context("workflow has no further task to schedule")?;
        let result = run.scheduler.schedule(&next, &mut run.wf)?;
        let success = result.success;
        let reason = result.failure_reason.clone();
        run.results.push(result);
        if !success {
            bail!(
                "could not schedule {next}: {}",
                reason.unwrap_or_else(|| "unknown reason".to_string())
            );
        }
        run.last_task = next;
        Ok(())
    };

    // After extract-frames lands, pick the EO satellite among its orbital
    // neighbors and point object-det's data-source SLO at it.
    let adjust_eo_sat = |state: &RefCell<RunState>| -> Result<()> {
        let run = &mut *state.borrow_mut();
        let placed = run
            .results
            .last()
            .context("no scheduling result recorded")?;
        if placed.target_node_type.as_deref() != Some("SatelliteNode") {
            bail!("extract-frames was not scheduled on a satellite");
        }
        let node_id: usize = placed
            .target_node
            .as_deref()
            .context("successful result without a target node")?
            .parse()
            .context("satellite node with a non-integer name")?;

        let eo_id = (node_id + 1) % satellites_count;
        let eo_sat = client
            .lookup(&eo_id.to_string())
            .with_context(|| format!("node {eo_id} does not exist"))?;
        run.wf.set_data_source_node(OBJECT_DET, 0, eo_sat)?;
        Ok(())
    };

    let fail_fast = |state: &RefCell<RunState>, step: Result<()>| {
        if let Err(err) = step {
            let run = &mut *state.borrow_mut();
            if run.error.is_none() {
                run.error = Some(err);
            }
        }
    };

    let aborted = |state: &RefCell<RunState>| {
        let run = state.borrow();
        run.error.is_some()
    };

    let mut actions: BTreeMap<i64, SimulationAction<'_>> = BTreeMap::new();
    actions.insert(
        2,
        Box::new(|_tick| {
            if aborted(&state) {
                return;
            }
            fail_fast(&state, schedule_next(&state).and_then(|_| adjust_eo_sat(&state)));
        }),
    );
    actions.insert(
        4,
        Box::new(|_tick| {
            if aborted(&state) {
                return;
            }
            fail_fast(&state, schedule_next(&state));
        }),
    );
    actions.insert(
        10,
        Box::new(|_tick| {
            if aborted(&state) {
                return;
            }
            fail_fast(&state, schedule_next(&state));
        }),
    );

    experiment.time_svc.run_simulation(actions);

    let run = state.into_inner();
    if let Some(err) = run.error {
        // Persist what was decided before the failure: partial results are
        // still useful when a scenario dies halfway.
        let _ = write_results_to_csv(results_csv, &run.results);
        return Err(err.context(format!(
            "wildfire experiment aborted after scheduling {} task(s) (last: {})",
            run.results.len(),
            run.last_task
        )));
    }

    info!(
        results = run.results.len(),
        csv = %results_csv.display(),
        "experiment finished"
    );
    write_results_to_csv(results_csv, &run.results)?;

    let scheduled = run.results.iter().filter(|r| r.success).count();
    info!(scheduled, of = run.results.len(), "tasks placed");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
