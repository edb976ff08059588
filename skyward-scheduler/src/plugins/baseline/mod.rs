/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Baseline schedulers used as experiment comparison points.
//!
//! Each baseline is expressed as a score plugin whose `normalize_scores`
//! simply crowns one candidate with 100 — the pipeline around them stays
//! identical, so scheduling-quality experiments compare like with like.

mod first_fit;
mod random;
mod round_robin;
mod select_all;

pub use first_fit::FirstFitPlugin;
pub use random::RandomSelectionPlugin;
pub use round_robin::RoundRobinPlugin;
pub use select_all::SelectAllNodesPlugin;
