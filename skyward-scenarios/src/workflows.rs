/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The wildfire-detection workflow.
//!
//! Four-task chain processing drone imagery:
//!
//! ```text
//! ingest ──100ms──► extract-frames ──150ms──► object-det ──250ms──► prepare-ds
//!                                                ▲
//!                                            80ms from the EO satellite
//! ```
//!
//! The ingest task is pinned to the drone producing the video; object
//! detection additionally pulls multispectral data from an
//! earth-observation satellite, chosen once the surrounding tasks have been
//! placed.

use std::collections::BTreeMap;
use std::rc::Rc;

use skyward_scheduler::model::{
    CpuArchitecture, DataSourceSLO, ModelError, NetworkSLO, PredecessorConfig, ResourceKind,
    ResourceMap, SharedNode, Task, Workflow,
};

pub const INGEST: &str = "ingest";
pub const EXTRACT_FRAMES: &str = "extract-frames";
pub const OBJECT_DET: &str = "object-det";
pub const PREPARE_DS: &str = "prepare-ds";

/// Builds the wildfire-detection workflow. `eo_sat` is the provisional
/// earth-observation satellite; drivers replace it via
/// [`Workflow::set_data_source_node`] once they know which satellites cover
/// the observation area.
pub fn create_wildfire_detection_wf(eo_sat: &SharedNode) -> Result<Workflow, ModelError> {
    let mut wf = Workflow::new();

    let ingest = Task::new(
        INGEST,
        "polarissloc/wildfire-det-ingest",
        ResourceMap::from([
            (ResourceKind::MilliCpu, 1000),
            (ResourceKind::MemoryMib, 2048),
        ]),
        vec![CpuArchitecture::Arm64],
    )?;
    wf.add_task(ingest)?;

    let extract_frames = Task::new(
        EXTRACT_FRAMES,
        "polarissloc/wildfire-det-extract-frames",
        ResourceMap::from([
            (ResourceKind::MilliCpu, 4000),
            (ResourceKind::MemoryMib, 2048),
        ]),
        vec![CpuArchitecture::Arm64, CpuArchitecture::Intel64],
    )?
    .with_expected_exec_time(BTreeMap::from([
        (CpuArchitecture::Arm64, 60_000),
        (CpuArchitecture::Intel64, 50_000),
    ]));
    wf.add_task_with_predecessors(
        extract_frames,
        vec![PredecessorConfig::new(INGEST, NetworkSLO::max_latency(100))],
    )?;

    let object_det = Task::new(
        OBJECT_DET,
        "polarissloc/wildfire-det-object-det",
        ResourceMap::from([
            (ResourceKind::MilliCpu, 4000),
            (ResourceKind::MemoryMib, 2048),
        ]),
        vec![CpuArchitecture::Arm64, CpuArchitecture::Intel64],
    )?
    .with_data_source_slos(vec![DataSourceSLO::new(
        Rc::clone(eo_sat),
        NetworkSLO::max_latency(80),
    )])
    .with_expected_exec_time(BTreeMap::from([
        (CpuArchitecture::Arm64, 180_000),
        (CpuArchitecture::Intel64, 170_000),
    ]));
    wf.add_task_with_predecessors(
        object_det,
        vec![PredecessorConfig::new(
            EXTRACT_FRAMES,
            NetworkSLO::max_latency(150),
        )],
    )?;

    let prepare_ds = Task::new(
        PREPARE_DS,
        "polarissloc/wildfire-det-prepare-ds",
        ResourceMap::from([
            (ResourceKind::MilliCpu, 4000),
            (ResourceKind::MemoryMib, 4096),
        ]),
        vec![CpuArchitecture::Arm64, CpuArchitecture::Intel64],
    )?
    .with_expected_exec_time(BTreeMap::from([
        (CpuArchitecture::Arm64, 90_000),
        (CpuArchitecture::Intel64, 80_000),
    ]));
    wf.add_task_with_predecessors(
        prepare_ds,
        vec![PredecessorConfig::new(
            OBJECT_DET,
            NetworkSLO::max_latency(250),
        )],
    )?;

    Ok(wf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
