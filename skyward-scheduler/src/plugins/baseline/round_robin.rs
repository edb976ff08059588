/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Round-robin baseline.

use crate::model::{NodeScore, SharedNode, Task};
use crate::pipeline::{SchedulingContext, ScorePlugin};
use crate::scheduler::SchedulerError;

/// Simulates a round-robin scheduler over integer-named nodes.
///
/// A cursor remembers the id of the last winner; the next winner is the
/// eligible candidate with the lowest id at or above `cursor + 1`, wrapping
/// around to the lowest eligible id when nothing above remains.
#[derive(Debug)]
pub struct RoundRobinPlugin {
    last_node_id: i64,
    total_nodes: i64,
}

impl RoundRobinPlugin {
    pub fn new(total_nodes: usize) -> Self {
        Self {
            last_node_id: -1,
            total_nodes: total_nodes as i64,
        }
    }

    fn node_id(node: &SharedNode) -> Result<i64, SchedulerError> {
        let node = node.borrow();
        node.name
            .parse()
            .map_err(|_| SchedulerError::NonNumericNodeName {
                node: node.name.clone(),
            })
    }
}

impl ScorePlugin for RoundRobinPlugin {
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

        let mut next_id = self.last_node_id + 1;
        if next_id == self.total_nodes {
            next_id = 0;
        }

        let mut lowest_ge_next: Option<(i64, usize)> = None;
        let mut lowest: Option<(i64, usize)> = None;
        for (idx, node_score) in node_scores.iter().enumerate() {
            let node_id = Self::node_id(&node_score.node)?;
            if node_id >= next_id && lowest_ge_next.map_or(true, |(id, _)| node_id < id) {
                lowest_ge_next = Some((node_id, idx));
            }
            if lowest.map_or(true, |(id, _)| node_id < id) {
                lowest = Some((node_id, idx));
            }
        }

        // Prefer the lowest id at or above the cursor; otherwise wrap around
        // to the lowest eligible id. `lowest` is Some: the list is non-empty.
        if let Some((id, idx)) = lowest_ge_next.or(lowest) {
            node_scores[idx].score = 100;
            self.last_node_id = id;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
