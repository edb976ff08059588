/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Satellite temperature estimation.

use crate::model::{CpuArchitecture, HeatInfo, ResourceKind, Task};

/// Estimates the peak hardware temperature of a satellite while it processes
/// a task.
///
/// The orbit-peak term is a deliberately coarse proxy
/// (`⌊base · minutes⌋ mod ⌊max_temp⌋`); downstream results depend on this
/// exact arithmetic, so it must not be "fixed".
#[derive(Debug, Default)]
pub struct HeatEstimator;

impl HeatEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimated maximum temperature during the task's expected runtime on
    /// a satellite with thermal state `heat` and architecture `arch`.
    ///
    /// Without an expected execution time for `arch` there is no prediction;
    /// the current temperature is returned unchanged.
    pub fn estimate_max_temp(&self, heat: &HeatInfo, arch: CpuArchitecture, task: &Task) -> f64 {
        let Some(&runtime_msec) = task.expected_exec_time_msec.get(&arch) else {
            return heat.temperature_c;
        };

        let runtime_minutes = runtime_msec as f64 / 1000.0 / 60.0;
        let orbit_peak = self.estimate_max_orbit_temp(heat, runtime_minutes);
        let compute_increase = self.estimate_compute_temp_increase(heat, task, runtime_minutes);
        orbit_peak + compute_increase
    }

    fn estimate_max_orbit_temp(&self, heat: &HeatInfo, runtime_minutes: f64) -> f64 {
        ((heat.mocked_max_orbit_base_temp_c * runtime_minutes) as i64
            % heat.max_temp_c as i64) as f64
    }

    fn estimate_compute_temp_increase(
        &self,
        heat: &HeatInfo,
        task: &Task,
        runtime_minutes: f64,
    ) -> f64 {
        let cpu_cores = task
            .req_resources
            .get(&ResourceKind::MilliCpu)
            .copied()
            .unwrap_or(0) as f64
            / 1000.0;
        let cpu_minutes = runtime_minutes * cpu_cores;
        let expected_increase = heat.temp_inc_per_cpu_minute_c * cpu_minutes;
        let cooling = heat.radiated_heat_per_minute_c * runtime_minutes;
        expected_increase - cooling
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
