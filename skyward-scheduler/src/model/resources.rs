/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Resource and CPU-architecture enumerations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The kinds of resources a node can offer and a task can request.
///
/// Not every node carries every kind: battery and recharge capacity only
/// appear on satellites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "milliCpu")]
    MilliCpu,
    #[serde(rename = "memoryMiB")]
    MemoryMib,
    /// The remaining battery charge in mAh.
    #[serde(rename = "batteryMAh")]
    BatteryMah,
    /// The recharge capacity of the satellite's solar panels.
    #[serde(rename = "rechargeCapWatts")]
    RechargeCapacityWatts,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::MilliCpu => "milliCpu",
            ResourceKind::MemoryMib => "memoryMiB",
            ResourceKind::BatteryMah => "batteryMAh",
            ResourceKind::RechargeCapacityWatts => "rechargeCapWatts",
        }
    }
}

/// Resource quantities keyed by kind.
///
/// `BTreeMap` (not `HashMap`) so iteration order is fixed — assignment and
/// conservation checks must behave identically across runs.
pub type ResourceMap = BTreeMap<ResourceKind, i64>;

/// CPU architectures present in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CpuArchitecture {
    #[serde(rename = "x86_64")]
    Intel64,
    #[serde(rename = "arm64")]
    Arm64,
}

impl CpuArchitecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpuArchitecture::Intel64 => "x86_64",
            CpuArchitecture::Arm64 => "arm64",
        }
    }
}

impl std::fmt::Display for CpuArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
