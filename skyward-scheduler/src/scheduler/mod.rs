/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The scheduling driver.
//!
//! [`Scheduler`] composes the four pipeline stages and runs one task at a
//! time to completion:
//!
//! ```text
//! select candidates ─► filter ─► score + normalise + average ─► commit
//! ```
//!
//! Per-task state machine: `Pending → Scheduling → {Scheduled(node) | Failed}`,
//! terminal. A failed task stays failed; the scheduler never retries on its
//! own.
//!
//! # Failure vs. error
//! "The fleet cannot host this task right now" is a *result*
//! (`success == false` plus a reason string) — experiments record it and move
//! on. Violated invariants (scheduling a task before its predecessor,
//! unknown task names, a rejected force-placement) are [`SchedulerError`]s
//! and abort the caller.

mod error;

pub use error::SchedulerError;

use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::model::{
    AvailableNodes, AvailableNodesIndexed, ModelError, NodeScore, SharedNode, Task, Workflow,
};
use crate::orchestrator::OrchestratorClient;
use crate::pipeline::{
    CommitPlugin, EligibleNode, FilterPlugin, SchedulingContext, ScorePlugin,
    SelectCandidateNodesPlugin,
};
use crate::util::Timer;

// ── SchedulingResult ──────────────────────────────────────────────────────────

/// The record of one scheduling decision.
///
/// Field declaration order is the column order of result CSV files; optional
/// fields serialise as empty cells when absent.
#[derive(Debug, Clone, Serialize)]
pub struct SchedulingResult {
    pub success: bool,
    pub task: String,
    pub scheduling_duration_msec: i64,
    pub target_node: Option<String>,
    pub target_node_type: Option<String>,
    pub score: Option<i64>,
    /// Mean latency bound over predecessor edges that declare one.
    pub avg_pred_latency_slo: Option<f64>,
    /// Mean observed latency over the same edges.
    pub avg_pred_latency: Option<f64>,
    /// Mean latency bound over data-source SLOs that declare one.
    pub avg_data_latency_slo: Option<f64>,
    /// Mean observed latency over the same data sources.
    pub avg_data_latency: Option<f64>,
    /// Satellite placements: current temperature minus recommended high.
    pub deg_c_over_recommended: Option<f64>,
    /// Satellite placements: current temperature minus hard maximum.
    pub deg_c_over_max: Option<f64>,
    pub failure_reason: Option<String>,
}

impl SchedulingResult {
    fn failure(task: &str, scheduling_duration_msec: i64, reason: String) -> Self {
        Self {
            success: false,
            task: task.to_string(),
            scheduling_duration_msec,
            target_node: None,
            target_node_type: None,
            score: None,
            avg_pred_latency_slo: None,
            avg_pred_latency: None,
            avg_data_latency_slo: None,
            avg_data_latency: None,
            deg_c_over_recommended: None,
            deg_c_over_max: None,
            failure_reason: Some(reason),
        }
    }

    fn success(task: &str, scheduling_duration_msec: i64, chosen: &EligibleNode) -> Self {
        let node = chosen.node.borrow();
        Self {
            success: true,
            task: task.to_string(),
            scheduling_duration_msec,
            target_node: Some(node.name.clone()),
            target_node_type: Some(node.node_type().as_str().to_string()),
            score: Some(chosen.score),
            avg_pred_latency_slo: None,
            avg_pred_latency: None,
            avg_data_latency_slo: None,
            avg_data_latency: None,
            deg_c_over_recommended: None,
            deg_c_over_max: None,
            failure_reason: None,
        }
    }
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Everything a [`Scheduler`] is assembled from. See
/// [`crate::config`] for the preset plugin sets.
pub struct SchedulerConfig {
    pub select_candidate_nodes_plugin: Box<dyn SelectCandidateNodesPlugin>,
    pub filter_plugins: Vec<Box<dyn FilterPlugin>>,
    pub score_plugins: Vec<Box<dyn ScorePlugin>>,
    pub commit_plugin: Box<dyn CommitPlugin>,
    pub orchestrator_client: Rc<dyn OrchestratorClient>,
}

// ── Pipeline outcome (internal) ───────────────────────────────────────────────

enum PipelineOutcome {
    NoCandidates,
    NoEligibleNodes,
    CommitRejected,
    Committed(EligibleNode),
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The multi-stage, plugin-based scheduler.
///
/// Holds the plugin chain and a layered index of the fleet. One `schedule`
/// call proceeds to completion before the next begins; simulated time only
/// advances between calls.
pub struct Scheduler {
    select_candidate_nodes_plugin: Box<dyn SelectCandidateNodesPlugin>,
    filter_plugins: Vec<Box<dyn FilterPlugin>>,
    score_plugins: Vec<Box<dyn ScorePlugin>>,
    commit_plugin: Box<dyn CommitPlugin>,
    orchestrator: Rc<dyn OrchestratorClient>,
    avail_nodes: AvailableNodesIndexed,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, nodes: &AvailableNodes) -> Self {
        Self {
            select_candidate_nodes_plugin: config.select_candidate_nodes_plugin,
            filter_plugins: config.filter_plugins,
            score_plugins: config.score_plugins,
            commit_plugin: config.commit_plugin,
            orchestrator: config.orchestrator_client,
            avail_nodes: AvailableNodesIndexed::from_nodes(nodes),
        }
    }

    // ── Public entry points ───────────────────────────────────────────────────

    /// Schedules one task of `workflow` onto the fleet.
    ///
    /// Scheduling failures are returned as an unsuccessful result; only
    /// invariant violations produce an `Err`.
    pub fn schedule(
        &mut self,
        task_name: &str,
        workflow: &mut Workflow,
    ) -> Result<SchedulingResult, SchedulerError> {
        let task = workflow
            .task(task_name)
            .ok_or_else(|| ModelError::UnknownTask {
                task: task_name.to_string(),
            })?
            .clone();
        if workflow.placement(task_name).is_some() {
            return Err(SchedulerError::AlreadyAttempted {
                task: task_name.to_string(),
            });
        }

        let mut timer = Timer::new();
        timer.start();

        let outcome = {
            let orchestrator = Rc::clone(&self.orchestrator);
            let ctx = SchedulingContext {
                workflow,
                orchestrator: &*orchestrator,
            };
            self.run_pipeline(&task, &ctx)?
        };

        match outcome {
            PipelineOutcome::NoCandidates => {
                self.fail(workflow, task_name, timer, "No candidate nodes".to_string())
            }
            PipelineOutcome::NoEligibleNodes => self.fail(
                workflow,
                task_name,
                timer,
                "Filtering returned no eligible nodes".to_string(),
            ),
            PipelineOutcome::CommitRejected => self.fail(
                workflow,
                task_name,
                timer,
                format!("Could not commit task {task_name} due to scheduling conflicts."),
            ),
            PipelineOutcome::Committed(chosen) => {
                workflow.record_placement(task_name, Some(Rc::clone(&chosen.node)));
                timer.stop();

                let mut result =
                    SchedulingResult::success(task_name, timer.duration_ms(), &chosen);
                self.fill_observability(&task, workflow, &chosen, &mut result)?;

                info!(
                    task = task_name,
                    node = %chosen.node.borrow().name,
                    score = chosen.score,
                    duration_ms = result.scheduling_duration_msec,
                    "task scheduled"
                );
                Ok(result)
            }
        }
    }

    /// Places `task` directly onto `node`, bypassing selection, filtering,
    /// and scoring. Used to seed experiments (e.g. pinning an ingest task to
    /// the drone that produces the data).
    ///
    /// # Errors
    /// A rejected reservation is fatal here — a forced placement that cannot
    /// hold means the experiment setup itself is wrong.
    pub fn force_schedule(
        &mut self,
        task_name: &str,
        workflow: &mut Workflow,
        node: &SharedNode,
    ) -> Result<SchedulingResult, SchedulerError> {
        let task = workflow
            .task(task_name)
            .ok_or_else(|| ModelError::UnknownTask {
                task: task_name.to_string(),
            })?
            .clone();

        let forced = vec![EligibleNode {
            node: Rc::clone(node),
            score: 100,
        }];

        let chosen = {
            let orchestrator = Rc::clone(&self.orchestrator);
            let ctx = SchedulingContext {
                workflow,
                orchestrator: &*orchestrator,
            };
            self.commit_plugin.commit(&task, &forced, &ctx)
        }
        .ok_or_else(|| SchedulerError::ForceScheduleRejected {
            task: task_name.to_string(),
            node: node.borrow().name.clone(),
        })?;

        workflow.record_placement(task_name, Some(Rc::clone(&chosen.node)));

        let mut result = SchedulingResult::success(task_name, 0, &chosen);
        self.fill_observability(&task, workflow, &chosen, &mut result)?;

        info!(
            task = task_name,
            node = %chosen.node.borrow().name,
            "task force-scheduled"
        );
        Ok(result)
    }

    // ── Pipeline stages ───────────────────────────────────────────────────────

    fn run_pipeline(
        &mut self,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<PipelineOutcome, SchedulerError> {
        let candidates =
            self.select_candidate_nodes_plugin
                .select_candidates(task, &self.avail_nodes, ctx)?;

        let mut eligible = match &candidates {
            Some(candidates) if candidates.is_empty() => {
                return Ok(PipelineOutcome::NoCandidates)
            }
            Some(candidates) => self.filter_nodes(task, ctx, candidates.values())?,
            // No selection configured: iterate the full fleet, layered.
            None => {
                let full_fleet = self
                    .avail_nodes
                    .cloud_nodes
                    .values()
                    .chain(self.avail_nodes.ground_stations.values())
                    .chain(self.avail_nodes.edge_nodes.values())
                    .chain(self.avail_nodes.satellites.values());
                self.filter_nodes(task, ctx, full_fleet)?
            }
        };

        debug!(
            task = %task.name,
            candidates = candidates.as_ref().map(|c| c.len()),
            eligible = eligible.len(),
            "filter stage finished"
        );
        if eligible.is_empty() {
            return Ok(PipelineOutcome::NoEligibleNodes);
        }

        self.score_nodes(task, ctx, &mut eligible)?;

        match self.commit_plugin.commit(task, &eligible, ctx) {
            Some(chosen) => Ok(PipelineOutcome::Committed(chosen)),
            None => Ok(PipelineOutcome::CommitRejected),
        }
    }

    fn filter_nodes<'n>(
        &self,
        task: &Task,
        ctx: &SchedulingContext<'_>,
        nodes: impl Iterator<Item = &'n SharedNode>,
    ) -> Result<Vec<EligibleNode>, SchedulerError> {
        let mut eligible = Vec::new();
        for node in nodes {
            let mut passes = true;
            for filter in &self.filter_plugins {
                if !filter.filter(node, task, ctx)? {
                    passes = false;
                    break;
                }
            }
            if passes {
                eligible.push(EligibleNode {
                    node: Rc::clone(node),
                    score: 0,
                });
            }
        }
        Ok(eligible)
    }

    /// Runs every score plugin over the eligible set, averages the
    /// normalised scores, and sorts descending. The sort is stable, so ties
    /// keep their selection order.
    fn score_nodes(
        &mut self,
        task: &Task,
        ctx: &SchedulingContext<'_>,
        eligible: &mut [EligibleNode],
    ) -> Result<(), SchedulerError> {
        for plugin in &mut self.score_plugins {
            let mut node_scores: Vec<NodeScore> = Vec::with_capacity(eligible.len());
            for entry in eligible.iter() {
                node_scores.push(NodeScore {
                    node: Rc::clone(&entry.node),
                    score: plugin.score(&entry.node, task, ctx)?,
                });
            }
            plugin.normalize_scores(task, &mut node_scores, ctx)?;
            for (entry, node_score) in eligible.iter_mut().zip(&node_scores) {
                entry.score += node_score.score;
            }
        }

        if !self.score_plugins.is_empty() {
            let plugin_count = self.score_plugins.len() as i64;
            for entry in eligible.iter_mut() {
                entry.score /= plugin_count;
            }
        }

        eligible.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(())
    }

    fn fail(
        &self,
        workflow: &mut Workflow,
        task_name: &str,
        mut timer: Timer,
        reason: String,
    ) -> Result<SchedulingResult, SchedulerError> {
        timer.stop();
        workflow.record_placement(task_name, None);
        warn!(task = task_name, reason = %reason, "scheduling failed");
        Ok(SchedulingResult::failure(
            task_name,
            timer.duration_ms(),
            reason,
        ))
    }

    // ── Observability ─────────────────────────────────────────────────────────

    /// Fills the latency and thermal observability fields of a successful
    /// result.
    fn fill_observability(
        &self,
        task: &Task,
        workflow: &Workflow,
        chosen: &EligibleNode,
        result: &mut SchedulingResult,
    ) -> Result<(), SchedulerError> {
        let mut pred_slo_sum = 0.0;
        let mut pred_actual_sum = 0.0;
        let mut pred_count = 0usize;
        for (slo, pred, placement) in workflow.incoming_link_slos(&task.name) {
            let Some(max_latency) = slo.max_latency_msec else {
                continue;
            };
            let src = placement.ok_or_else(|| ModelError::UnscheduledPredecessor {
                task: task.name.clone(),
                predecessor: pred,
            })?;
            pred_slo_sum += max_latency as f64;
            pred_actual_sum += self.orchestrator.latency(&src, &chosen.node);
            pred_count += 1;
        }
        if pred_count > 0 {
            result.avg_pred_latency_slo = Some(pred_slo_sum / pred_count as f64);
            result.avg_pred_latency = Some(pred_actual_sum / pred_count as f64);
        }

        let mut data_slo_sum = 0.0;
        let mut data_actual_sum = 0.0;
        let mut data_count = 0usize;
        for ds in &task.data_source_slos {
            let Some(max_latency) = ds.slo.max_latency_msec else {
                continue;
            };
            data_slo_sum += max_latency as f64;
            data_actual_sum += self.orchestrator.latency(&ds.data_source, &chosen.node);
            data_count += 1;
        }
        if data_count > 0 {
            result.avg_data_latency_slo = Some(data_slo_sum / data_count as f64);
            result.avg_data_latency = Some(data_actual_sum / data_count as f64);
        }

        let node = chosen.node.borrow();
        if let Some(heat) = node.heat_info() {
            result.deg_c_over_recommended =
                Some(heat.temperature_c - heat.recommended_high_temp_c);
            result.deg_c_over_max = Some(heat.temperature_c - heat.max_temp_c);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CpuArchitecture, HeatInfo, Location, NetworkSLO, Node, PredecessorConfig, ResourceKind,
        ResourceMap,
    };
    use crate::orchestrator::NodesManager;
    use crate::pipeline::CandidateNodes;
    use crate::plugins::baseline::{FirstFitPlugin, SelectAllNodesPlugin};
    use crate::plugins::{
        HeatOptPlugin, MultiCommitPlugin, NetworkQosPlugin, ResourcesFitPlugin,
    };
    use std::collections::HashMap;

    /// Orchestrator with a real node directory (so reservations mutate
    /// state) and a fixed latency table.
    struct TestOrchestrator {
        nodes_mgr: NodesManager,
        latencies: HashMap<(String, String), f64>,
    }

    impl TestOrchestrator {
        fn new(nodes: &AvailableNodes, latencies: &[(&str, &str, f64)]) -> Self {
            Self {
                nodes_mgr: NodesManager::new(AvailableNodesIndexed::from_nodes(nodes)),
                latencies: latencies
                    .iter()
                    .map(|(s, d, l)| ((s.to_string(), d.to_string()), *l))
                    .collect(),
            }
        }
    }

    impl OrchestratorClient for TestOrchestrator {
        fn lookup(&self, name: &str) -> Option<SharedNode> {
            self.nodes_mgr.get_node_by_name(name)
        }

        fn latency(&self, src: &SharedNode, dst: &SharedNode) -> f64 {
            let key = (src.borrow().name.clone(), dst.borrow().name.clone());
            self.latencies.get(&key).copied().unwrap_or(-1.0)
        }

        fn satellite_position(&self, node: &SharedNode) -> Result<Location, SchedulerError> {
            Err(SchedulerError::NotASatellite {
                node: node.borrow().name.clone(),
            })
        }

        fn assign(&self, task: &Task, node: &SharedNode) -> bool {
            self.nodes_mgr.assign_task(task, node)
        }
    }

    /// Select plugin returning a fixed verdict, for driving the failure
    /// paths.
    struct FixedSelect(Option<Vec<SharedNode>>);

    impl SelectCandidateNodesPlugin for FixedSelect {
        fn select_candidates(
            &mut self,
            _task: &Task,
            _all_nodes: &AvailableNodesIndexed,
            _ctx: &SchedulingContext<'_>,
        ) -> Result<Option<CandidateNodes>, SchedulerError> {
            Ok(self.0.as_ref().map(|nodes| {
                nodes
                    .iter()
                    .map(|n| (n.borrow().name.clone(), Rc::clone(n)))
                    .collect()
            }))
        }
    }

    fn resources(mcpu: i64, mem: i64) -> ResourceMap {
        ResourceMap::from([(ResourceKind::MilliCpu, mcpu), (ResourceKind::MemoryMib, mem)])
    }

    fn heat(temperature_c: f64) -> HeatInfo {
        HeatInfo {
            temperature_c,
            max_temp_c: 75.0,
            recommended_high_temp_c: 65.0,
            temp_inc_per_cpu_minute_c: 1.0,
            radiated_heat_per_minute_c: 0.1,
            mocked_max_orbit_base_temp_c: 55.0,
        }
    }

    fn task(name: &str, mcpu: i64, mem: i64) -> Task {
        Task::new(
            name,
            "img",
            resources(mcpu, mem),
            vec![CpuArchitecture::Arm64, CpuArchitecture::Intel64],
        )
        .unwrap()
    }

    /// Edge "1" (near), ground station "2", satellite "0".
    fn small_fleet() -> AvailableNodes {
        AvailableNodes {
            cloud_nodes: vec![],
            ground_stations: vec![Node::ground_station(
                "2",
                resources(32_000, 32_768),
                CpuArchitecture::Intel64,
                Location::ground(50.0, 5.15),
            )
            .into_shared()],
            edge_nodes: vec![Node::edge(
                "1",
                resources(4000, 4096),
                CpuArchitecture::Arm64,
                Location::ground(39.49, -122.98),
            )
            .into_shared()],
            satellites: vec![Node::satellite(
                "0",
                resources(4000, 4096),
                CpuArchitecture::Arm64,
                heat(70.0),
            )
            .into_shared()],
        }
    }

    fn scheduler_with(
        nodes: &AvailableNodes,
        latencies: &[(&str, &str, f64)],
        select: Box<dyn SelectCandidateNodesPlugin>,
        filters: Vec<Box<dyn FilterPlugin>>,
        scorers: Vec<Box<dyn ScorePlugin>>,
    ) -> Scheduler {
        let orchestrator = Rc::new(TestOrchestrator::new(nodes, latencies));
        Scheduler::new(
            SchedulerConfig {
                select_candidate_nodes_plugin: select,
                filter_plugins: filters,
                score_plugins: scorers,
                commit_plugin: Box::new(MultiCommitPlugin::new()),
                orchestrator_client: orchestrator,
            },
            nodes,
        )
    }

    #[test]
    fn schedules_onto_the_first_eligible_node() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![Box::new(ResourcesFitPlugin::new())],
            vec![Box::new(FirstFitPlugin::new())],
        );

        let mut wf = Workflow::new();
        wf.add_task(task("ingest", 1000, 2048)).unwrap();

        let result = scheduler.schedule("ingest", &mut wf).unwrap();
        assert!(result.success);
        // SelectAll offers ground stations first.
        assert_eq!(result.target_node.as_deref(), Some("2"));
        assert_eq!(result.target_node_type.as_deref(), Some("GroundStationNode"));
        assert_eq!(result.score, Some(100));
        assert!(result.failure_reason.is_none());

        // Placement recorded and resources reserved exactly once.
        let placed = wf.placement("ingest").flatten().unwrap();
        assert_eq!(placed.borrow().name, "2");
        assert_eq!(placed.borrow().free(ResourceKind::MilliCpu), 31_000);
    }

    #[test]
    fn unknown_task_is_an_error() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        assert!(scheduler.schedule("ghost", &mut wf).is_err());
    }

    #[test]
    fn empty_candidate_set_fails_the_schedule() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(FixedSelect(Some(vec![]))),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("t", 1000, 1024)).unwrap();

        let result = scheduler.schedule("t", &mut wf).unwrap();
        assert!(!result.success);
        assert_eq!(result.failure_reason.as_deref(), Some("No candidate nodes"));
        assert!(matches!(wf.placement("t"), Some(None)));
    }

    #[test]
    fn null_candidate_set_iterates_the_full_fleet() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(FixedSelect(None)),
            vec![Box::new(ResourcesFitPlugin::new())],
            vec![Box::new(FirstFitPlugin::new())],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("t", 1000, 1024)).unwrap();

        // Default order is cloud, ground, edge, satellite; with no cloud
        // nodes the ground station comes first.
        let result = scheduler.schedule("t", &mut wf).unwrap();
        assert_eq!(result.target_node.as_deref(), Some("2"));
    }

    #[test]
    fn filtering_everything_out_fails_with_reason() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![Box::new(ResourcesFitPlugin::new())],
            vec![],
        );
        let mut wf = Workflow::new();
        // More CPU than any node has.
        wf.add_task(task("t", 100_000, 1024)).unwrap();

        let result = scheduler.schedule("t", &mut wf).unwrap();
        assert!(!result.success);
        assert_eq!(
            result.failure_reason.as_deref(),
            Some("Filtering returned no eligible nodes")
        );
    }

    #[test]
    fn exhausted_commits_fail_with_reason() {
        let nodes = small_fleet();
        // Drain every node first.
        for node in nodes
            .ground_stations
            .iter()
            .chain(&nodes.edge_nodes)
            .chain(&nodes.satellites)
        {
            node.borrow_mut().resources.insert(ResourceKind::MilliCpu, 0);
        }
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![],
            vec![Box::new(FirstFitPlugin::new())],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("t", 1000, 1024)).unwrap();

        let result = scheduler.schedule("t", &mut wf).unwrap();
        assert!(!result.success);
        assert_eq!(
            result.failure_reason.as_deref(),
            Some("Could not commit task t due to scheduling conflicts.")
        );
        assert!(matches!(wf.placement("t"), Some(None)));
    }

    #[test]
    fn terminal_states_are_never_retried() {
        let nodes = small_fleet();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(FixedSelect(Some(vec![]))),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("t", 1000, 1024)).unwrap();

        let result = scheduler.schedule("t", &mut wf).unwrap();
        assert!(!result.success);

        let err = scheduler.schedule("t", &mut wf).unwrap_err();
        assert!(matches!(err, SchedulerError::AlreadyAttempted { .. }));
    }

    #[test]
    fn scores_are_averaged_across_plugins() {
        let nodes = small_fleet();
        // Chain a → b; a on edge "1". Latencies make the ground station the
        // closer choice; the satellite is hot (heat score 50).
        let mut scheduler = scheduler_with(
            &nodes,
            &[("1", "2", 20.0), ("1", "0", 90.0)],
            Box::new(SelectAllNodesPlugin::new()),
            vec![
                Box::new(ResourcesFitPlugin::new()),
                Box::new(NetworkQosPlugin::new()),
            ],
            vec![Box::new(NetworkQosPlugin::new()), Box::new(HeatOptPlugin::new())],
        );

        let mut wf = Workflow::new();
        wf.add_task(task("a", 1000, 1024)).unwrap();
        wf.add_task_with_predecessors(
            task("b", 1000, 1024),
            vec![PredecessorConfig::new("a", NetworkSLO::max_latency(100))],
        )
        .unwrap();
        let edge = nodes.edge_nodes[0].clone();
        scheduler.force_schedule("a", &mut wf, &edge).unwrap();

        let result = scheduler.schedule("b", &mut wf).unwrap();
        assert!(result.success);
        // Ground "2": network 100, heat 100 → 100. Satellite "0": network 0,
        // heat 50 → 25. Edge "1" is unreachable from itself in the latency
        // table, so it fails the QoS filter.
        assert_eq!(result.target_node.as_deref(), Some("2"));
        assert_eq!(result.score, Some(100));

        // Observability: one predecessor edge with a 100 ms bound, actual 20.
        assert_eq!(result.avg_pred_latency_slo, Some(100.0));
        assert_eq!(result.avg_pred_latency, Some(20.0));
        assert!(result.avg_data_latency_slo.is_none());
        assert!(result.deg_c_over_recommended.is_none());
    }

    #[test]
    fn satellite_placement_reports_thermal_headroom() {
        let nodes = small_fleet();
        let sat = nodes.satellites[0].clone();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("t", 1000, 1024)).unwrap();

        let result = scheduler.force_schedule("t", &mut wf, &sat).unwrap();
        assert_eq!(result.deg_c_over_recommended, Some(5.0));
        assert_eq!(result.deg_c_over_max, Some(-5.0));
        assert_eq!(result.target_node_type.as_deref(), Some("SatelliteNode"));
    }

    #[test]
    fn force_schedule_reports_zero_duration_and_reserves_once() {
        let nodes = small_fleet();
        let edge = nodes.edge_nodes[0].clone();
        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("ingest", 1000, 2048)).unwrap();

        let result = scheduler.force_schedule("ingest", &mut wf, &edge).unwrap();
        assert!(result.success);
        assert_eq!(result.scheduling_duration_msec, 0);
        assert_eq!(result.score, Some(100));
        assert_eq!(
            wf.placement("ingest").flatten().unwrap().borrow().name,
            "1"
        );
        assert_eq!(edge.borrow().free(ResourceKind::MilliCpu), 3000);
        assert_eq!(edge.borrow().free(ResourceKind::MemoryMib), 2048);
    }

    #[test]
    fn rejected_force_schedule_is_fatal() {
        let nodes = small_fleet();
        let edge = nodes.edge_nodes[0].clone();
        edge.borrow_mut().resources.insert(ResourceKind::MilliCpu, 0);

        let mut scheduler = scheduler_with(
            &nodes,
            &[],
            Box::new(SelectAllNodesPlugin::new()),
            vec![],
            vec![],
        );
        let mut wf = Workflow::new();
        wf.add_task(task("ingest", 1000, 2048)).unwrap();

        let err = scheduler.force_schedule("ingest", &mut wf, &edge).unwrap_err();
        assert!(matches!(err, SchedulerError::ForceScheduleRejected { .. }));
    }

    #[test]
    fn identical_runs_make_identical_decisions() {
        let run = || {
            let nodes = small_fleet();
            let mut scheduler = scheduler_with(
                &nodes,
                &[("1", "2", 20.0), ("1", "0", 90.0)],
                Box::new(SelectAllNodesPlugin::new()),
                vec![Box::new(ResourcesFitPlugin::new())],
                vec![Box::new(NetworkQosPlugin::new()), Box::new(HeatOptPlugin::new())],
            );
            let mut wf = Workflow::new();
            wf.add_task(task("a", 1000, 1024)).unwrap();
            wf.add_task_with_predecessors(
                task("b", 1000, 1024),
                vec![PredecessorConfig::new("a", NetworkSLO::max_latency(100))],
            )
            .unwrap();
            let edge = nodes.edge_nodes[0].clone();
            scheduler.force_schedule("a", &mut wf, &edge).unwrap();
            let result = scheduler.schedule("b", &mut wf).unwrap();
            (result.target_node, result.score)
        };

        assert_eq!(run(), run());
    }
}
