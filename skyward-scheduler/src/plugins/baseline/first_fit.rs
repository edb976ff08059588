/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Greedy first-fit baseline.

use crate::model::{NodeScore, SharedNode, Task};
use crate::pipeline::{SchedulingContext, ScorePlugin};
use crate::scheduler::SchedulerError;

/// Simulates a greedy first-fit scheduler: the first eligible candidate
/// always wins.
#[derive(Debug, Default)]
pub struct FirstFitPlugin;

impl FirstFitPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl ScorePlugin for FirstFitPlugin {
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
        if let Some(first) = node_scores.first_mut() {
            first.score = 100;
        }
        Ok(())
    }
}
