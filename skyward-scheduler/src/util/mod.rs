/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Small shared utilities: geodesic distance, satellite heat estimation,
//! and wall-clock timing for result records.

mod geo;
mod heat;
mod timer;

pub use geo::{great_circle_distance_km, EARTH_RADIUS_KM};
pub use heat::HeatEstimator;
pub use timer::Timer;
