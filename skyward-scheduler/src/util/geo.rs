/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Geodesic distance on the WGS84-ish sphere.

use crate::model::Location;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle (haversine) distance between two locations in kilometres.
///
/// Altitude is ignored: vicinity radii are defined over the ground track, so
/// a satellite is compared by its sub-satellite point.
pub fn great_circle_distance_km(a: &Location, b: &Location) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_long = (b.long - a.long).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_long / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let loc = Location::ground(39.49, -122.98);
        assert!(great_circle_distance_km(&loc, &loc) < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let redu = Location::ground(50.002352, 5.148141);
        let white_sands = Location::ground(32.500649, -106.608803);
        let d1 = great_circle_distance_km(&redu, &white_sands);
        let d2 = great_circle_distance_km(&white_sands, &redu);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_longitude_at_equator_is_about_111_km() {
        let a = Location::ground(0.0, 0.0);
        let b = Location::ground(0.0, 1.0);
        let d = great_circle_distance_km(&a, &b);
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_the_circumference_apart() {
        let a = Location::ground(0.0, 0.0);
        let b = Location::ground(0.0, 180.0);
        let d = great_circle_distance_km(&a, &b);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1.0, "got {d}");
    }

    #[test]
    fn altitude_does_not_change_the_ground_track_distance() {
        let ground = Location::ground(10.0, 20.0);
        let overhead = Location {
            lat: 10.0,
            long: 20.0,
            altitude_km: 550.0,
        };
        assert!(great_circle_distance_km(&ground, &overhead) < 1e-9);
    }
}
