/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Network-QoS latency filter and score.
//!
//! One plugin, two facets: as a filter it enforces every incoming latency
//! SLO; as a score it favors candidates whose worst incoming latency is
//! lowest. Bandwidth SLOs are declared in the model but not enforced.

use tracing::debug;

use crate::model::{NodeScore, SharedNode, Task};
use crate::pipeline::{FilterPlugin, SchedulingContext, ScorePlugin};
use crate::scheduler::SchedulerError;

#[derive(Debug, Default)]
pub struct NetworkQosPlugin;

impl NetworkQosPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl FilterPlugin for NetworkQosPlugin {
    /// A node passes iff, for every incoming SLO with a latency bound, the
    /// current rounded latency from the SLO's source stays within the bound.
    /// An unreachable source (latency `-1`) fails the bound.
    fn filter(
        &self,
        node: &SharedNode,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<bool, SchedulerError> {
        for (slo, src_node) in ctx.workflow.all_incoming_slos(task)? {
            let Some(max_latency) = slo.max_latency_msec else {
                continue;
            };
            let latency = ctx.orchestrator.latency(&src_node, node);
            if latency < 0.0 || latency.round() as i64 > max_latency {
                debug!(
                    task = %task.name,
                    node = %node.borrow().name,
                    src = %src_node.borrow().name,
                    latency,
                    max_latency,
                    "latency SLO violated"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl ScorePlugin for NetworkQosPlugin {
    /// Raw score: the highest incoming latency across all incoming SLOs,
    /// rounded to whole milliseconds.
    fn score(
        &mut self,
        node: &SharedNode,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<i64, SchedulerError> {
        let mut highest_latency = 0.0f64;
        for (_slo, src_node) in ctx.workflow.all_incoming_slos(task)? {
            let latency = ctx.orchestrator.latency(&src_node, node);
            highest_latency = highest_latency.max(latency);
        }
        Ok(highest_latency.round() as i64)
    }

    /// Rescales to `[0, 100]`: the spread between the highest and the lowest
    /// latency is mapped linearly so that the lowest-latency candidate gets
    /// 100 and the highest gets 0.
    fn normalize_scores(
        &mut self,
        _task: &Task,
        node_scores: &mut [NodeScore],
        _ctx: &SchedulingContext<'_>,
    ) -> Result<(), SchedulerError> {
        let lowest = node_scores.iter().map(|ns| ns.score).min().unwrap_or(0);
        let highest = node_scores.iter().map(|ns| ns.score).max().unwrap_or(0);
        let max_diff = (highest - lowest).max(1) as f64;

        for ns in node_scores.iter_mut() {
            let diff = (highest - ns.score) as f64;
            ns.score = (diff / max_diff * 100.0).floor() as i64;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CpuArchitecture, Location, NetworkSLO, Node, PredecessorConfig, ResourceKind, ResourceMap,
        Workflow,
    };
    use crate::orchestrator::OrchestratorClient;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Orchestrator stub with a fixed latency table keyed by (src, dst) name.
    struct TableOrchestrator {
        latencies: HashMap<(String, String), f64>,
    }

    impl TableOrchestrator {
        fn new(entries: &[(&str, &str, f64)]) -> Self {
            let latencies = entries
                .iter()
                .map(|(s, d, l)| ((s.to_string(), d.to_string()), *l))
                .collect();
            Self { latencies }
        }
    }

    impl OrchestratorClient for TableOrchestrator {
        fn lookup(&self, _name: &str) -> Option<SharedNode> {
            None
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

        fn assign(&self, _task: &Task, _node: &SharedNode) -> bool {
            true
        }
    }

    fn node(name: &str) -> SharedNode {
        Node::edge(
            name,
            ResourceMap::from([(ResourceKind::MilliCpu, 4000)]),
            CpuArchitecture::Arm64,
            Location::ground(0.0, 0.0),
        )
        .into_shared()
    }

    fn task(name: &str) -> Task {
        Task::new(
            name,
            "img",
            ResourceMap::from([(ResourceKind::MilliCpu, 1000)]),
            vec![CpuArchitecture::Arm64],
        )
        .unwrap()
    }

    /// `a → b` with the given latency bound; `a` placed on node "1".
    fn chain_workflow(max_latency_msec: i64) -> Workflow {
        let mut wf = Workflow::new();
        wf.add_task(task("a")).unwrap();
        wf.add_task_with_predecessors(
            task("b"),
            vec![PredecessorConfig::new(
                "a",
                NetworkSLO::max_latency(max_latency_msec),
            )],
        )
        .unwrap();
        wf.record_placement("a", Some(node("1")));
        wf
    }

    #[test]
    fn latency_within_bound_passes() {
        let wf = chain_workflow(100);
        let orch = TableOrchestrator::new(&[("1", "2", 80.0)]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let b = wf.task("b").unwrap().clone();
        assert!(NetworkQosPlugin::new().filter(&node("2"), &b, &ctx).unwrap());
    }

    #[test]
    fn latency_above_bound_fails() {
        let wf = chain_workflow(100);
        let orch = TableOrchestrator::new(&[("1", "2", 150.0)]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let b = wf.task("b").unwrap().clone();
        assert!(!NetworkQosPlugin::new().filter(&node("2"), &b, &ctx).unwrap());
    }

    #[test]
    fn unreachable_source_fails_the_filter() {
        let wf = chain_workflow(100);
        let orch = TableOrchestrator::new(&[]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let b = wf.task("b").unwrap().clone();
        assert!(!NetworkQosPlugin::new().filter(&node("2"), &b, &ctx).unwrap());
    }

    #[test]
    fn latency_is_rounded_before_the_comparison() {
        let wf = chain_workflow(100);
        // 100.4 rounds down to 100 → passes; 100.6 rounds to 101 → fails.
        let orch = TableOrchestrator::new(&[("1", "2", 100.4), ("1", "3", 100.6)]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let b = wf.task("b").unwrap().clone();
        let plugin = NetworkQosPlugin::new();
        assert!(plugin.filter(&node("2"), &b, &ctx).unwrap());
        assert!(!plugin.filter(&node("3"), &b, &ctx).unwrap());
    }

    #[test]
    fn unscheduled_predecessor_is_fatal() {
        let mut wf = Workflow::new();
        wf.add_task(task("a")).unwrap();
        wf.add_task_with_predecessors(
            task("b"),
            vec![PredecessorConfig::new("a", NetworkSLO::max_latency(100))],
        )
        .unwrap();

        let orch = TableOrchestrator::new(&[]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let b = wf.task("b").unwrap().clone();
        assert!(NetworkQosPlugin::new().filter(&node("2"), &b, &ctx).is_err());
    }

    #[test]
    fn score_is_the_worst_incoming_latency() {
        let mut wf = chain_workflow(200);
        let c = task("c");
        wf.add_task_with_predecessors(
            c,
            vec![
                PredecessorConfig::new("a", NetworkSLO::max_latency(200)),
                PredecessorConfig::new("b", NetworkSLO::max_latency(200)),
            ],
        )
        .unwrap();
        wf.record_placement("b", Some(node("4")));

        let orch = TableOrchestrator::new(&[("1", "9", 40.0), ("4", "9", 90.4)]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let c = wf.task("c").unwrap().clone();
        let score = NetworkQosPlugin::new().score(&node("9"), &c, &ctx).unwrap();
        assert_eq!(score, 90);
    }

    #[test]
    fn normalize_maps_lowest_latency_to_100() {
        let mut scores = vec![
            NodeScore { node: node("0"), score: 20 },
            NodeScore { node: node("1"), score: 120 },
            NodeScore { node: node("2"), score: 70 },
        ];
        let wf = Workflow::new();
        let orch = TableOrchestrator::new(&[]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        NetworkQosPlugin::new()
            .normalize_scores(&task("t"), &mut scores, &ctx)
            .unwrap();

        assert_eq!(scores[0].score, 100);
        assert_eq!(scores[1].score, 0);
        assert_eq!(scores[2].score, 50);
    }

    #[test]
    fn normalize_with_equal_latencies_is_all_zero() {
        let mut scores = vec![
            NodeScore { node: node("0"), score: 33 },
            NodeScore { node: node("1"), score: 33 },
        ];
        let wf = Workflow::new();
        let orch = TableOrchestrator::new(&[]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        NetworkQosPlugin::new()
            .normalize_scores(&task("t"), &mut scores, &ctx)
            .unwrap();

        // Zero spread: every candidate maps to floor(0 / 1 · 100).
        assert!(scores.iter().all(|ns| ns.score == 0));
    }

    #[test]
    fn ties_preserve_order() {
        let mut scores = vec![
            NodeScore { node: node("5"), score: 10 },
            NodeScore { node: node("7"), score: 10 },
            NodeScore { node: node("6"), score: 50 },
        ];
        let wf = Workflow::new();
        let orch = TableOrchestrator::new(&[]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        NetworkQosPlugin::new()
            .normalize_scores(&task("t"), &mut scores, &ctx)
            .unwrap();

        assert_eq!(scores[0].node.borrow().name, "5");
        assert_eq!(scores[1].node.borrow().name, "7");
        assert_eq!(scores[0].score, scores[1].score);
    }

    #[test]
    fn data_source_slos_participate_in_filtering() {
        let mut wf = Workflow::new();
        let ds = node("8");
        let t = task("solo").with_data_source_slos(vec![crate::model::DataSourceSLO::new(
            Rc::clone(&ds),
            NetworkSLO::max_latency(50),
        )]);
        wf.add_task(t).unwrap();

        let orch = TableOrchestrator::new(&[("8", "2", 60.0)]);
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        let solo = wf.task("solo").unwrap().clone();
        assert!(!NetworkQosPlugin::new().filter(&node("2"), &solo, &ctx).unwrap());
    }
}
