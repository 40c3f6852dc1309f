//! Haversine distance model.
//!
//! Great-circle distance on a sphere of radius 6371 km. Inputs are not
//! validated: non-finite coordinates yield NaN/Inf distances, which then
//! propagate into tour totals. Validation belongs to the planner layer.

use crate::traits::{DistanceMatrixProvider, Waypoint};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total length of the closed tour visiting `path` in order, including
/// the edge from the last point back to the first.
pub fn cyclic_distance<W: Waypoint>(path: &[W]) -> f64 {
    let n = path.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| haversine_km(path[i].location(), path[(i + 1) % n].location()))
        .sum()
}

/// Haversine-based distance matrix provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    matrix[i][j] = haversine_km(*from, *to);
                }
            }
        }

        matrix
    }
}
