/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Resource and architecture fit filter.

use crate::model::{SharedNode, Task};
use crate::pipeline::{FilterPlugin, SchedulingContext};
use crate::scheduler::SchedulerError;

/// Rejects nodes that cannot run the task's image or do not have every
/// required resource quantity free.
#[derive(Debug, Default)]
pub struct ResourcesFitPlugin;

impl ResourcesFitPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl FilterPlugin for ResourcesFitPlugin {
    fn filter(
        &self,
        node: &SharedNode,
        task: &Task,
        _ctx: &SchedulingContext<'_>,
    ) -> Result<bool, SchedulerError> {
        let node = node.borrow();
        if !task.supports_arch(node.cpu_arch) {
            return Ok(false);
        }
        for (kind, req) in &task.req_resources {
            if node.free(*kind) < *req {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
