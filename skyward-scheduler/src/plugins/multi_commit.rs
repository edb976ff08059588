/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Multi-attempt commit.
//!
//! Between scoring and committing, another task's reservation may have
//! consumed resources on the preferred node. Trying the next-best candidate
//! is much cheaper than re-running the whole pipeline, so up to
//! [`NODES_TO_TRY`] candidates are attempted in preference order.

use tracing::debug;

use crate::model::Task;
use crate::pipeline::{CommitPlugin, EligibleNode, SchedulingContext};

/// Maximum number of reservation attempts per scheduling run.
pub const NODES_TO_TRY: usize = 3;

#[derive(Debug, Default)]
pub struct MultiCommitPlugin;

impl MultiCommitPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl CommitPlugin for MultiCommitPlugin {
    fn commit(
        &self,
        task: &Task,
        scored_nodes: &[EligibleNode],
        ctx: &SchedulingContext<'_>,
    ) -> Option<EligibleNode> {
        let mut nodes_tried = 0;
        for candidate in scored_nodes {
            if nodes_tried == NODES_TO_TRY {
                break;
            }
            if ctx.orchestrator.assign(task, &candidate.node) {
                return Some(candidate.clone());
            }
            debug!(
                task = %task.name,
                node = %candidate.node.borrow().name,
                attempt = nodes_tried + 1,
                "reservation rejected, trying next candidate"
            );
            nodes_tried += 1;
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
