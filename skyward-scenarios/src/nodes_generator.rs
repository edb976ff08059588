/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Seeded fleet generation.
//!
//! Node names are the stringified matrix indices of the constellation:
//! satellites occupy `0..S`, edge nodes follow, ground stations come last.
//! Resource and heat profiles are picked by the seeded RNG, so the same
//! seed always produces the same fleet.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use skyward_scheduler::model::{
    AvailableNodes, CpuArchitecture, HeatInfo, Location, Node, ResourceKind, ResourceMap,
    SharedNode,
};

/// Fallback profiles, used only if a caller passes an empty profile list.
const DEFAULT_HEAT: HeatInfo = HeatInfo {
    temperature_c: 45.0,
    max_temp_c: 75.0,
    recommended_high_temp_c: 65.0,
    temp_inc_per_cpu_minute_c: 1.0,
    radiated_heat_per_minute_c: 0.1,
    mocked_max_orbit_base_temp_c: 55.0,
};

pub struct NodesGenerator {
    rng: StdRng,
}

impl NodesGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `count` satellites named `start_id..start_id + count`, each
    /// with a resource and heat profile picked from the given lists.
    pub fn generate_satellites(
        &mut self,
        start_id: usize,
        count: usize,
        resources: &[ResourceMap],
        heat_configs: &[HeatInfo],
    ) -> Vec<SharedNode> {
        (start_id..start_id + count)
            .map(|id| {
                Node::satellite(
                    id.to_string(),
                    self.pick_resources(resources),
                    CpuArchitecture::Arm64,
                    heat_configs.choose(&mut self.rng).copied().unwrap_or(DEFAULT_HEAT),
                )
                .into_shared()
            })
            .collect()
    }

    /// Generates one edge node per location, named from `start_id` upward.
    pub fn generate_edge_nodes(
        &mut self,
        start_id: usize,
        resources: &[ResourceMap],
        locations_lat_long: &[(f64, f64)],
    ) -> Vec<SharedNode> {
        locations_lat_long
            .iter()
            .enumerate()
            .map(|(offset, &(lat, long))| {
                Node::edge(
                    (start_id + offset).to_string(),
                    self.pick_resources(resources),
                    CpuArchitecture::Arm64,
                    Location::ground(lat, long),
                )
                .into_shared()
            })
            .collect()
    }

    /// Generates one ground station per location, named from `start_id`
    /// upward.
    pub fn generate_ground_stations(
        &mut self,
        start_id: usize,
        resources: &[ResourceMap],
        locations_lat_long: &[(f64, f64)],
    ) -> Vec<SharedNode> {
        locations_lat_long
            .iter()
            .enumerate()
            .map(|(offset, &(lat, long))| {
                Node::ground_station(
                    (start_id + offset).to_string(),
                    self.pick_resources(resources),
                    CpuArchitecture::Intel64,
                    Location::ground(lat, long),
                )
                .into_shared()
            })
            .collect()
    }

    /// Generates the standard experiment fleet: small ARM satellites with a
    /// battery budget, drone-class edge nodes, and beefy ground stations.
    pub fn generate_nodes(
        &mut self,
        satellites_count: usize,
        edge_node_locs_lat_long: &[(f64, f64)],
        ground_station_locs_lat_long: &[(f64, f64)],
    ) -> AvailableNodes {
        let satellites = self.generate_satellites(
            0,
            satellites_count,
            &[ResourceMap::from([
                (ResourceKind::MemoryMib, 4096),
                (ResourceKind::MilliCpu, 4000),
                (ResourceKind::BatteryMah, 10_000),
            ])],
            &[
                HeatInfo {
                    max_temp_c: 75.0,
                    recommended_high_temp_c: 65.0,
                    temperature_c: 45.0,
                    radiated_heat_per_minute_c: 0.1,
                    temp_inc_per_cpu_minute_c: 1.0,
                    mocked_max_orbit_base_temp_c: 55.0,
                },
                HeatInfo {
                    max_temp_c: 75.0,
                    recommended_high_temp_c: 65.0,
                    temperature_c: 45.0,
                    radiated_heat_per_minute_c: 0.1,
                    temp_inc_per_cpu_minute_c: 2.0,
                    mocked_max_orbit_base_temp_c: 60.0,
                },
                HeatInfo {
                    max_temp_c: 75.0,
                    recommended_high_temp_c: 65.0,
                    temperature_c: 35.0,
                    radiated_heat_per_minute_c: 0.1,
                    temp_inc_per_cpu_minute_c: 0.5,
                    mocked_max_orbit_base_temp_c: 45.0,
                },
            ],
        );

        let edge_nodes = self.generate_edge_nodes(
            satellites_count,
            &[
                ResourceMap::from([
                    (ResourceKind::MemoryMib, 2048),
                    (ResourceKind::MilliCpu, 2000),
                ]),
                ResourceMap::from([
                    (ResourceKind::MemoryMib, 4096),
                    (ResourceKind::MilliCpu, 4000),
                ]),
            ],
            edge_node_locs_lat_long,
        );

        let ground_stations = self.generate_ground_stations(
            satellites_count + edge_node_locs_lat_long.len(),
            &[ResourceMap::from([
                (ResourceKind::MemoryMib, 32_768),
                (ResourceKind::MilliCpu, 32_000),
            ])],
            ground_station_locs_lat_long,
        );

        AvailableNodes {
            cloud_nodes: vec![],
            ground_stations,
            edge_nodes,
            satellites,
        }
    }

    /// Uniformly random locations within the given lat/long bounds.
    pub fn generate_random_locations(
        &mut self,
        count: usize,
        bounds_lat_long: ((f64, f64), (f64, f64)),
    ) -> Vec<(f64, f64)> {
        let (a, b) = bounds_lat_long;
        let lat_min = a.0.min(b.0);
        let lat_max = a.0.max(b.0);
        let long_min = a.1.min(b.1);
        let long_max = a.1.max(b.1);

        (0..count)
            .map(|_| {
                (
                    self.rng.gen_range(lat_min..=lat_max),
                    self.rng.gen_range(long_min..=long_max),
                )
            })
            .collect()
    }

    fn pick_resources(&mut self, choices: &[ResourceMap]) -> ResourceMap {
        choices.choose(&mut self.rng).cloned().unwrap_or_default()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
