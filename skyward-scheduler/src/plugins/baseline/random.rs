/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Random-placement baseline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{NodeScore, SharedNode, Task};
use crate::pipeline::{SchedulingContext, ScorePlugin};
use crate::scheduler::SchedulerError;

/// Simulates a random scheduler: a uniformly chosen eligible candidate
/// wins. The RNG is seeded at construction so experiment runs are
/// reproducible.
#[derive(Debug)]
pub struct RandomSelectionPlugin {
    rng: StdRng,
}

impl RandomSelectionPlugin {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ScorePlugin for RandomSelectionPlugin {
    fn score(
        &mut self,
        _node: &SharedNode,
        _task: &Task,
        _ctx: &SchedulingContext<'_>,
    ) -> Result<i64, SchedulerError> {
        Ok(0)
    }

    fn normalize_scores(
        &mut self,
        _task: &Task,
        node_scores: &mut [NodeScore],
        _ctx: &SchedulingContext<'_>,
    ) -> Result<(), SchedulerError> {
        if node_scores.is_empty() {
            return Ok(());
        }
        let index = self.rng.gen_range(0..node_scores.len());
        node_scores[index].score = 100;
        Ok(())
    }
}
