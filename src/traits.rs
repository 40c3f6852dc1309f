//! Core seams for the tour solvers.
//!
//! Callers implement `Waypoint` for their own records so the solved path
//! hands back the same records, enrichment included.

/// Anything with a geographic location can be toured.
pub trait Waypoint {
    /// Location coordinates (lat, lon) in decimal degrees.
    fn location(&self) -> (f64, f64);
}

impl<W: Waypoint + ?Sized> Waypoint for &W {
    fn location(&self) -> (f64, f64) {
        (**self).location()
    }
}

/// Provides a distance matrix (kilometers) for a set of locations.
///
/// The matrix is indexed by the provided location order. Entry `[i][j]`
/// is the cost of travelling from location `i` to location `j`.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}
