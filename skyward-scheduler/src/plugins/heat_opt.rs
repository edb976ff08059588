/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Thermal-headroom score for satellites.

use crate::model::{NodeScore, SharedNode, Task};
use crate::pipeline::{SchedulingContext, ScorePlugin};
use crate::scheduler::SchedulerError;
use crate::util::HeatEstimator;

/// Favors satellites that will not overheat while running the task.
/// Terrestrial nodes always get the top score.
#[derive(Debug, Default)]
pub struct HeatOptPlugin {
    heat_estimator: HeatEstimator,
}

impl HeatOptPlugin {
    pub fn new() -> Self {
        Self {
            heat_estimator: HeatEstimator::new(),
        }
    }

    /// 100 while the expected peak stays at or below the recommended
    /// temperature, 0 once it exceeds the hard maximum, linear in between.
    fn compute_score(expected_temp: f64, recommended_temp: f64, max_temp: f64) -> i64 {
        if expected_temp <= recommended_temp {
            return 100;
        }
        if expected_temp > max_temp {
            return 0;
        }

        // range cannot be 0 here: that would imply expected <= recommended.
        let range = max_temp - recommended_temp;
        let over_recommended = expected_temp - recommended_temp;
        let inv_percentage_over = 1.0 - over_recommended / range;
        (inv_percentage_over * 100.0).floor() as i64
    }
}

impl ScorePlugin for HeatOptPlugin {
    /// Scores directly within `[0, 100]`; the default identity
    /// normalisation applies.
    fn score(
        &mut self,
        node: &SharedNode,
        task: &Task,
        _ctx: &SchedulingContext<'_>,
    ) -> Result<i64, SchedulerError> {
        let node = node.borrow();
        let Some(heat) = node.heat_info() else {
            return Ok(100);
        };

        let expected_max_temp = self
            .heat_estimator
            .estimate_max_temp(heat, node.cpu_arch, task);
        Ok(Self::compute_score(
            expected_max_temp,
            heat.recommended_high_temp_c,
            heat.max_temp_c,
        ))
    }

    fn normalize_scores(
        &mut self,
        _task: &Task,
        _node_scores: &mut [NodeScore],
        _ctx: &SchedulingContext<'_>,
    ) -> Result<(), SchedulerError> {
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CpuArchitecture, HeatInfo, Location, Node, ResourceKind, ResourceMap, Workflow,
    };
    use crate::orchestrator::OrchestratorClient;
    use std::collections::BTreeMap;

    struct NoopOrchestrator;

    impl OrchestratorClient for NoopOrchestrator {
        fn lookup(&self, _name: &str) -> Option<SharedNode> {
            None
        }
        fn latency(&self, _src: &SharedNode, _dst: &SharedNode) -> f64 {
            -1.0
        }
        fn satellite_position(&self, node: &SharedNode) -> Result<Location, SchedulerError> {
            Err(SchedulerError::NotASatellite {
                node: node.borrow().name.clone(),
            })
        }
        fn assign(&self, _task: &Task, _node: &SharedNode) -> bool {
            false
        }
    }

    fn satellite(temperature_c: f64) -> SharedNode {
        Node::satellite(
            "0",
            ResourceMap::from([(ResourceKind::MilliCpu, 4000)]),
            CpuArchitecture::Arm64,
            HeatInfo {
                temperature_c,
                max_temp_c: 75.0,
                recommended_high_temp_c: 65.0,
                temp_inc_per_cpu_minute_c: 1.0,
                radiated_heat_per_minute_c: 0.1,
                mocked_max_orbit_base_temp_c: 55.0,
            },
        )
        .into_shared()
    }

    fn task() -> Task {
        // No expected execution time: the estimate falls back to the
        // satellite's current temperature.
        Task::new(
            "t",
            "img",
            ResourceMap::from([(ResourceKind::MilliCpu, 4000)]),
            vec![CpuArchitecture::Arm64],
        )
        .unwrap()
    }

    fn score_of(node: &SharedNode) -> i64 {
        let wf = Workflow::new();
        let orch = NoopOrchestrator;
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        HeatOptPlugin::new().score(node, &task(), &ctx).unwrap()
    }

    #[test]
    fn terrestrial_nodes_always_score_100() {
        let edge = Node::edge(
            "1",
            ResourceMap::from([(ResourceKind::MilliCpu, 4000)]),
            CpuArchitecture::Arm64,
            Location::ground(0.0, 0.0),
        )
        .into_shared();
        assert_eq!(score_of(&edge), 100);
    }

    #[test]
    fn cool_satellite_scores_100() {
        assert_eq!(score_of(&satellite(45.0)), 100);
    }

    #[test]
    fn satellite_at_recommended_temperature_scores_100() {
        assert_eq!(score_of(&satellite(65.0)), 100);
    }

    #[test]
    fn warm_satellite_scores_linearly() {
        // 70 °C with recommended 65 / max 75: halfway over → 50.
        assert_eq!(score_of(&satellite(70.0)), 50);
    }

    #[test]
    fn overheated_satellite_scores_0() {
        assert_eq!(score_of(&satellite(76.0)), 0);
    }

    #[test]
    fn predicted_runtime_heat_lowers_the_score() {
        // 1 min at 4 cores on a 45 °C satellite:
        //   orbit peak 55, gain 3.9 → 58.9 ≤ 65 → still 100.
        // 3 min at 4 cores: orbit peak (55·3)%75 = 15, gain 11.7 → 26.7 → 100.
        // Use a hotter profile to cross the recommended line: base 69.
        let node = Node::satellite(
            "0",
            ResourceMap::from([(ResourceKind::MilliCpu, 4000)]),
            CpuArchitecture::Arm64,
            HeatInfo {
                temperature_c: 45.0,
                max_temp_c: 75.0,
                recommended_high_temp_c: 65.0,
                temp_inc_per_cpu_minute_c: 1.0,
                radiated_heat_per_minute_c: 0.1,
                mocked_max_orbit_base_temp_c: 69.0,
            },
        )
        .into_shared();
        let t = task().with_expected_exec_time(BTreeMap::from([(CpuArchitecture::Arm64, 60_000)]));

        let wf = Workflow::new();
        let orch = NoopOrchestrator;
        let ctx = SchedulingContext {
            workflow: &wf,
            orchestrator: &orch,
        };
        // orbit peak 69, gain 3.9 → 72.9; over by 7.9 of 10 → floor lands on
        // 20 (the floor bites on the f64 representation of 21.0 − ε).
        let score = HeatOptPlugin::new().score(&node, &t, &ctx).unwrap();
        assert_eq!(score, 20);
    }
}
