//! Labeled geographic point.
//!
//! The label is opaque: it travels with the point into the solved path but
//! never participates in distance computation.

use serde::{Deserialize, Serialize};

use crate::traits::Waypoint;

/// A named location in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Point {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Whether both coordinates are finite and within
    /// lat ∈ [-90, 90], lon ∈ [-180, 180].
    pub fn is_valid(&self) -> bool {
        coordinates_valid(self.location())
    }
}

impl Waypoint for Point {
    fn location(&self) -> (f64, f64) {
        (self.lat, self.lon)
    }
}

/// Range check shared with the planner's input validation.
pub fn coordinates_valid((lat, lon): (f64, f64)) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}
