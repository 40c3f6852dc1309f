//! Errors raised while validating route requests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("at least 2 points are required, got {count}")]
    TooFewPoints { count: usize },

    #[error("point {index} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },

    #[error("exact solver accepts at most {limit} points, got {count}")]
    TooManyPoints { count: usize, limit: usize },
}
