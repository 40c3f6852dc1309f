//! tour-planner core
//!
//! Closed-tour optimization over geographic points: a nearest-neighbor
//! heuristic and an exact Held-Karp solver sharing a haversine distance model.

pub mod traits;
pub mod point;
pub mod haversine;
pub mod solver;
pub mod planner;
pub mod error;
