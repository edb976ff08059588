/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Fatal errors of the scheduling pipeline.
//!
//! The propagation policy is strict: scheduling *failures* (no candidates,
//! filtering left nothing, every commit attempt was rejected) never surface
//! here — they are returned as unsuccessful
//! [`SchedulingResult`](super::SchedulingResult)s. Everything in this enum is
//! an invariant or configuration violation; the scheduler does not attempt
//! recovery.

use thiserror::Error;

use crate::model::ModelError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Structural error raised by the data model (unknown task, unscheduled
    /// predecessor, invalid construction).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// `schedule` was called for a task that already reached a terminal
    /// state. Placements are never retried automatically.
    #[error("task '{task}' has already reached a terminal scheduling state")]
    AlreadyAttempted { task: String },

    /// A satellite-only operation was invoked on a terrestrial node.
    #[error("node '{node}' is not a satellite")]
    NotASatellite { node: String },

    /// The orbital data source has no position for a claimed satellite id.
    #[error("no position for satellite '{node}' at tick {tick}")]
    MissingSatellitePosition { node: String, tick: i64 },

    /// The round-robin baseline requires integer node names.
    #[error("node '{node}' does not have the integer name required by round-robin selection")]
    NonNumericNodeName { node: String },

    /// A forced placement was rejected by the orchestrator. Force-scheduling
    /// seeds experiments; a refusal means the experiment setup is broken.
    #[error("force-scheduling task '{task}' onto node '{node}' was rejected by the orchestrator")]
    ForceScheduleRejected { task: String, node: String },
}
