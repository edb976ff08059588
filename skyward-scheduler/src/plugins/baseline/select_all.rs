/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Whole-fleet candidate selection.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::{AvailableNodesIndexed, SharedNode, Task};
use crate::pipeline::{CandidateNodes, SchedulingContext, SelectCandidateNodesPlugin};
use crate::scheduler::SchedulerError;

/// Offers every node of the fleet as a candidate. Used by the baseline
/// schedulers, which have no notion of vicinity.
#[derive(Debug, Default)]
pub struct SelectAllNodesPlugin;

impl SelectAllNodesPlugin {
    pub fn new() -> Self {
        Self
    }

    fn extend(out: &mut CandidateNodes, layer: &IndexMap<String, SharedNode>) {
        for (name, node) in layer {
            out.insert(name.clone(), Rc::clone(node));
        }
    }
}

impl SelectCandidateNodesPlugin for SelectAllNodesPlugin {
    fn select_candidates(
        &mut self,
        _task: &Task,
        all_nodes: &AvailableNodesIndexed,
        _ctx: &SchedulingContext<'_>,
    ) -> Result<Option<CandidateNodes>, SchedulerError> {
        let mut candidates = CandidateNodes::new();
        Self::extend(&mut candidates, &all_nodes.ground_stations);
        Self::extend(&mut candidates, &all_nodes.cloud_nodes);
        Self::extend(&mut candidates, &all_nodes.edge_nodes);
        Self::extend(&mut candidates, &all_nodes.satellites);
        Ok(Some(candidates))
    }
}
