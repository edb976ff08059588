/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The built-in pipeline plugins.
//!
//! The SLO-aware scheduler is assembled from [`SelectNodesInVicinityPlugin`],
//! [`ResourcesFitPlugin`], [`NetworkQosPlugin`], [`HeatOptPlugin`], and
//! [`MultiCommitPlugin`]; the `baseline` module carries the comparison
//! schedulers used in experiments.

pub mod baseline;

mod heat_opt;
mod multi_commit;
mod network_qos;
mod resources_fit;
mod select_vicinity;

pub use heat_opt::HeatOptPlugin;
pub use multi_commit::{MultiCommitPlugin, NODES_TO_TRY};
pub use network_qos::NetworkQosPlugin;
pub use resources_fit::ResourcesFitPlugin;
pub use select_vicinity::{SelectNodesInVicinityPlugin, VicinityConfig};
