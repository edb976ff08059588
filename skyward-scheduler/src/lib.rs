/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Skyward – SLO-aware task scheduler for the 3D compute continuum
//!
//! Places the tasks of DAG workflows onto a heterogeneous fleet spanning
//! LEO satellites, terrestrial edge devices, ground stations, and an
//! optional cloud layer.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── model/         – resources, nodes, tasks, SLOs, workflow DAG
//! ├── orchestrator/  – orchestrator contract, node directory, network
//! │                    graph, simulation-backed client, time service
//! ├── pipeline/      – plugin traits + scheduling context
//! ├── plugins/       – vicinity selector, resource/QoS filters, QoS and
//! │                    thermal scores, commit, baseline schedulers
//! ├── scheduler/     – the scheduling driver + result records
//! ├── config/        – plugin-set presets and YAML tuning files
//! └── util/          – geodesic distance, heat estimation, timing
//! ```

pub mod config;
pub mod model;
pub mod orchestrator;
pub mod pipeline;
pub mod plugins;
pub mod scheduler;
pub mod util;
