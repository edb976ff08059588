/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The plugin interfaces of the scheduling pipeline.
//!
//! One `schedule` call flows through four independent stages:
//!
//! ```text
//! SelectCandidateNodes ──► Filter* ──► Score*/normalize ──► Commit
//! ```
//!
//! The scheduler holds ordered collections of each stage and treats them
//! uniformly; no stage knows about any other. Plugins that need mutable
//! state (the round-robin cursor, seeded RNGs) take `&mut self`; `normalize`
//! runs after all per-candidate scoring, so score plugins must hold no
//! inter-candidate state anywhere else.

use indexmap::IndexMap;

use crate::model::{AvailableNodesIndexed, NodeScore, SharedNode, Task, Workflow};
use crate::orchestrator::OrchestratorClient;
use crate::scheduler::SchedulerError;

/// Everything a plugin may consult while working on one task.
pub struct SchedulingContext<'a> {
    pub workflow: &'a Workflow,
    pub orchestrator: &'a dyn OrchestratorClient,
}

/// A candidate that passed every filter, accumulating normalised scores.
#[derive(Debug, Clone)]
pub struct EligibleNode {
    pub node: SharedNode,
    pub score: i64,
}

/// Candidate set in selection order. Insertion order is part of the
/// contract: downstream tie-breaks must follow it.
pub type CandidateNodes = IndexMap<String, SharedNode>;

/// Picks the candidate nodes for a task.
pub trait SelectCandidateNodesPlugin {
    /// Returns the candidates, or `None` to let the scheduler iterate the
    /// full fleet. An empty map means "no candidates — fail the schedule".
    ///
    /// # Errors
    /// Fails on invariant violations, e.g. a predecessor that exists but
    /// has no placement yet.
    fn select_candidates(
        &mut self,
        task: &Task,
        all_nodes: &AvailableNodesIndexed,
        ctx: &SchedulingContext<'_>,
    ) -> Result<Option<CandidateNodes>, SchedulerError>;
}

/// Filters out nodes that cannot host a task. A node is eligible iff every
/// configured filter returns `true`.
pub trait FilterPlugin {
    fn filter(
        &self,
        node: &SharedNode,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<bool, SchedulerError>;
}

/// Scores how well suited an eligible node is for a task.
pub trait ScorePlugin {
    /// Raw score for one node. Plugins whose raw scores are not yet in
    /// `[0, 100]` must rescale them in [`normalize_scores`](Self::normalize_scores).
    fn score(
        &mut self,
        node: &SharedNode,
        task: &Task,
        ctx: &SchedulingContext<'_>,
    ) -> Result<i64, SchedulerError>;

    /// Rescales the raw scores of the whole candidate set to `[0, 100]`.
    ///
    /// The default keeps the raw scores — for plugins that already score
    /// within range.
    fn normalize_scores(
        &mut self,
        task: &Task,
        node_scores: &mut [NodeScore],
        ctx: &SchedulingContext<'_>,
    ) -> Result<(), SchedulerError> {
        let _ = (task, node_scores, ctx);
        Ok(())
    }
}

/// Commits the scheduling decision against the orchestrator.
pub trait CommitPlugin {
    /// Walks the preference list (descending score) and attempts the atomic
    /// resource reservation. Returns the accepted candidate, or `None` if
    /// every attempted reservation was rejected.
    fn commit(
        &self,
        task: &Task,
        scored_nodes: &[EligibleNode],
        ctx: &SchedulingContext<'_>,
    ) -> Option<EligibleNode>;
}
