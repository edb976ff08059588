/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! A deterministic stand-in for the orbital network simulator.
//!
//! Real experiments run against a constellation simulator that propagates
//! satellite trajectories and derives inter-node delays. This synthetic
//! source reproduces the same *interface* — per-tick positions and a
//! symmetric delay matrix — from a simplified Walker-style constellation:
//! nearly circular orbits, planes spread evenly in ascending node, phases
//! advancing by a fixed number of degrees per tick.
//!
//! Everything is a pure function of (configuration, tick), so runs are
//! reproducible by construction.

use skyward_scheduler::model::Location;
use skyward_scheduler::orchestrator::ConstellationDataSource;
use skyward_scheduler::util::EARTH_RADIUS_KM;

/// Speed of light, km per millisecond.
const C_KM_PER_MS: f64 = 299.792;

/// Effective signal speed in terrestrial fiber, km per millisecond.
const FIBER_KM_PER_MS: f64 = 200.0;

/// Shape of the synthetic constellation.
#[derive(Debug, Clone, Copy)]
pub struct ConstellationConfig {
    pub orbit_planes: usize,
    pub altitude_km: f64,
    pub inclination_deg: f64,
    /// Orbital phase advance per simulated tick.
    pub deg_per_tick: f64,
    /// Maximum inter-satellite link range.
    pub isl_range_km: f64,
    /// Maximum satellite-to-ground link range.
    pub ground_link_range_km: f64,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            orbit_planes: 6,
            altitude_km: 550.0,
            inclination_deg: 53.0,
            deg_per_tick: 3.6,
            isl_range_km: 3000.0,
            ground_link_range_km: 2000.0,
        }
    }
}

/// Synthetic [`ConstellationDataSource`]: satellites first (indices
/// `0..satellites`), then the terrestrial nodes in fleet order.
pub struct SyntheticConstellation {
    satellites: usize,
    terrestrial: Vec<Location>,
    config: ConstellationConfig,
}

impl SyntheticConstellation {
    pub fn new(satellites: usize, terrestrial: Vec<Location>, config: ConstellationConfig) -> Self {
        Self {
            satellites,
            terrestrial,
            config,
        }
    }

    pub fn total_nodes(&self) -> usize {
        self.satellites + self.terrestrial.len()
    }

    /// Mocked ground track of satellite `index` at `tick`.
    fn satellite_position(&self, index: usize, tick: i64) -> Location {
        let cfg = &self.config;
        let planes = cfg.orbit_planes.max(1);
        let plane = index % planes;
        let slot = index / planes;
        let sats_per_plane = self.satellites.div_ceil(planes).max(1);

        let raan_deg = plane as f64 * (360.0 / planes as f64);
        let phase_deg = (slot as f64 * (360.0 / sats_per_plane as f64)
            + tick as f64 * cfg.deg_per_tick)
            % 360.0;

        let lat = cfg.inclination_deg * phase_deg.to_radians().sin();
        let long = normalize_longitude(raan_deg + phase_deg.to_radians().cos() * 90.0);
        Location {
            lat,
            long,
            altitude_km: cfg.altitude_km,
        }
    }

    fn node_position(&self, index: usize, tick: i64) -> Location {
        if index < self.satellites {
            self.satellite_position(index, tick)
        } else {
            self.terrestrial[index - self.satellites]
        }
    }

    fn is_satellite(&self, index: usize) -> bool {
        index < self.satellites
    }

    /// Delay in ms between two nodes, 0.0 when no link exists.
    fn link_delay_ms(&self, a: usize, b: usize, tick: i64) -> f64 {
        let pos_a = self.node_position(a, tick);
        let pos_b = self.node_position(b, tick);

        match (self.is_satellite(a), self.is_satellite(b)) {
            // Terrestrial nodes reach each other over the WAN.
            (false, false) => slant_range_km(&pos_a, &pos_b) / FIBER_KM_PER_MS,
            (true, true) => {
                let range = slant_range_km(&pos_a, &pos_b);
                if range <= self.config.isl_range_km {
                    range / C_KM_PER_MS
                } else {
                    0.0
                }
            }
            _ => {
                let range = slant_range_km(&pos_a, &pos_b);
                if range <= self.config.ground_link_range_km {
                    range / C_KM_PER_MS
                } else {
                    0.0
                }
            }
        }
    }
}

impl ConstellationDataSource for SyntheticConstellation {
    fn delay_matrix(&self, tick: i64) -> Vec<Vec<f64>> {
        let n = self.total_nodes();
        let mut matrix = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let delay = self.link_delay_ms(i, j, tick);
                matrix[i][j] = delay;
                matrix[j][i] = delay;
            }
        }
        matrix
    }

    fn positions(&self, tick: i64) -> Vec<Location> {
        (0..self.total_nodes())
            .map(|i| self.node_position(i, tick))
            .collect()
    }
}

fn normalize_longitude(mut deg: f64) -> f64 {
    while deg > 180.0 {
        deg -= 360.0;
    }
    while deg < -180.0 {
        deg += 360.0;
    }
    deg
}

/// Straight-line distance through space between two positions, in km.
fn slant_range_km(a: &Location, b: &Location) -> f64 {
    let ea = ecef_km(a);
    let eb = ecef_km(b);
    ((ea[0] - eb[0]).powi(2) + (ea[1] - eb[1]).powi(2) + (ea[2] - eb[2]).powi(2)).sqrt()
}

fn ecef_km(loc: &Location) -> [f64; 3] {
    let r = EARTH_RADIUS_KM + loc.altitude_km;
    let lat = loc.lat.to_radians();
    let long = loc.long.to_radians();
    [
        r * lat.cos() * long.cos(),
        r * lat.cos() * long.sin(),
        r * lat.sin(),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
