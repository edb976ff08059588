/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structural errors raised by the data model.
//!
//! These are configuration and invariant failures — they are always fatal to
//! the caller. Scheduling failures (no candidates, commit conflicts) are
//! **not** errors; they are carried as data inside a
//! [`SchedulingResult`](crate::scheduler::SchedulingResult).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A task was constructed with an empty name.
    #[error("task name cannot be empty")]
    EmptyTaskName,

    /// A task was constructed without any required resources.
    #[error("task '{task}' must request at least one resource")]
    EmptyResources { task: String },

    /// A task was constructed without any supported CPU architecture.
    #[error("task '{task}' must support at least one CPU architecture")]
    NoCpuArchitecture { task: String },

    /// A task with the same name already exists in the workflow.
    #[error("task '{task}' already exists in the workflow")]
    DuplicateTask { task: String },

    /// A name lookup referenced a task that is not part of the workflow.
    #[error("task '{task}' does not exist in the workflow")]
    UnknownTask { task: String },

    /// An edge references a predecessor that was never added.
    #[error("predecessor task '{predecessor}' of '{task}' does not exist in the workflow")]
    UnknownPredecessor { task: String, predecessor: String },

    /// A query required the placement of a predecessor that has none.
    #[error("predecessor '{predecessor}' of task '{task}' has not been scheduled")]
    UnscheduledPredecessor { task: String, predecessor: String },

    /// A data-source SLO index was out of range.
    #[error("task '{task}' has no data-source SLO at index {index}")]
    NoSuchDataSourceSlo { task: String, index: usize },
}
