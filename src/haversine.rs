//! Great-circle distances.
//!
//! Straight-line distance over a spherical Earth. Ignores roads entirely,
//! which is good enough for ordering a handful of nearby errands.

use crate::traits::DistanceMatrixProvider;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two `(lat, lng)` points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lng1) = from;
    let (lat2, lng2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 near antipodes.
    let c = 2.0 * a.sqrt().clamp(-1.0, 1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Kilometer matrix built from [`haversine_km`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate().skip(i + 1) {
                let km = haversine_km(*from, *to);
                matrix[i][j] = km;
                matrix[j][i] = km;
            }
        }

        matrix
    }
}
