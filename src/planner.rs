//! Route planning boundary.
//!
//! Validates caller input, selects a strategy, times the solve and shapes
//! the result for the service layer. The solvers themselves never fail;
//! everything that can be rejected is rejected here.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanError;
use crate::point::coordinates_valid;
use crate::solver::{solve, Strategy};
use crate::traits::Waypoint;

/// Hard upper bound on exact-solver input; larger configured limits are clamped.
///
/// At 20 points the cost and predecessor tables hold 20·2²⁰ entries each,
/// about 336 MB together.
pub const EXACT_POINT_CEILING: usize = 20;

pub const DEFAULT_ROUTE_NAME: &str = "Unnamed Route";

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Largest point count the exact solver will be run on.
    pub max_exact_points: usize,
    /// Name used when a request carries none.
    pub default_route_name: String,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_exact_points: 16, // ~16 MB of DP state
            default_route_name: DEFAULT_ROUTE_NAME.to_string(),
        }
    }
}

impl PlanOptions {
    pub fn exact_limit(&self) -> usize {
        self.max_exact_points.min(EXACT_POINT_CEILING)
    }
}

/// A request to order `points` into a closed tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest<T> {
    #[serde(alias = "cities")]
    pub points: Vec<T>,
    #[serde(default)]
    pub algorithm: Strategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
}

impl<T> RouteRequest<T> {
    pub fn new(points: Vec<T>, algorithm: Strategy) -> Self {
        Self {
            points,
            algorithm,
            route_name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.route_name = Some(name.into());
        self
    }
}

/// A planned route, ready for display or storage by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan<T> {
    pub route_name: String,
    pub algorithm: Strategy,
    pub path: Vec<T>,
    /// Closed tour length in kilometers.
    pub distance: f64,
    /// Wall-clock solver time in milliseconds.
    pub execution_time_ms: f64,
}

/// Check that a tour is meaningful and every coordinate is in range.
pub fn validate_points<T: Waypoint>(points: &[T]) -> Result<(), PlanError> {
    if points.len() < 2 {
        return Err(PlanError::TooFewPoints {
            count: points.len(),
        });
    }

    for (index, point) in points.iter().enumerate() {
        let (lat, lon) = point.location();
        if !coordinates_valid((lat, lon)) {
            return Err(PlanError::InvalidCoordinate { index, lat, lon });
        }
    }

    Ok(())
}

/// Validate and solve a single request.
pub fn plan_route<T>(
    request: &RouteRequest<T>,
    options: &PlanOptions,
) -> Result<RoutePlan<T>, PlanError>
where
    T: Waypoint + Clone,
{
    validate_points(&request.points)?;

    let count = request.points.len();
    let limit = options.exact_limit();
    if request.algorithm == Strategy::Dynamic && count > limit {
        return Err(PlanError::TooManyPoints { count, limit });
    }

    let started = Instant::now();
    let tour = solve(&request.points, request.algorithm);
    let execution_time_ms = started.elapsed().as_secs_f64() * 1000.0;

    let route_name = request
        .route_name
        .clone()
        .unwrap_or_else(|| options.default_route_name.clone());

    debug!(
        route = %route_name,
        strategy = request.algorithm.as_str(),
        points = count,
        distance_km = tour.total_distance,
        execution_time_ms,
        "route planned"
    );

    Ok(RoutePlan {
        route_name,
        algorithm: request.algorithm,
        path: tour.path,
        distance: tour.total_distance,
        execution_time_ms,
    })
}

/// Plan independent requests in parallel, one result per request in input order.
pub fn plan_routes<T>(
    requests: &[RouteRequest<T>],
    options: &PlanOptions,
) -> Vec<Result<RoutePlan<T>, PlanError>>
where
    T: Waypoint + Clone + Send + Sync,
{
    requests
        .par_iter()
        .map(|request| plan_route(request, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn square() -> Vec<Point> {
        vec![
            Point::new("A", 0.0, 0.0),
            Point::new("B", 0.0, 1.0),
            Point::new("C", 1.0, 1.0),
            Point::new("D", 1.0, 0.0),
        ]
    }

    #[test]
    fn test_exact_limit_clamped() {
        let options = PlanOptions {
            max_exact_points: 64,
            ..PlanOptions::default()
        };
        assert_eq!(options.exact_limit(), EXACT_POINT_CEILING);
        assert_eq!(EXACT_POINT_CEILING, 20);
        assert_eq!(PlanOptions::default().exact_limit(), 16);
    }

    #[test]
    fn test_rejects_single_point() {
        let request = RouteRequest::new(vec![Point::new("solo", 0.0, 0.0)], Strategy::Greedy);
        let err = plan_route(&request, &PlanOptions::default()).unwrap_err();
        assert_eq!(err, PlanError::TooFewPoints { count: 1 });
    }

    #[test]
    fn test_rejects_empty() {
        let request: RouteRequest<Point> = RouteRequest::new(Vec::new(), Strategy::Dynamic);
        let err = plan_route(&request, &PlanOptions::default()).unwrap_err();
        assert_eq!(err, PlanError::TooFewPoints { count: 0 });
    }

    #[test]
    fn test_rejects_out_of_range_coordinate() {
        let mut points = square();
        points[2].lat = 95.0;
        let err = validate_points(&points).unwrap_err();
        assert!(matches!(err, PlanError::InvalidCoordinate { index: 2, .. }));
    }

    #[test]
    fn test_rejects_nan_coordinate() {
        let mut points = square();
        points[1].lon = f64::NAN;
        let err = validate_points(&points).unwrap_err();
        assert!(matches!(err, PlanError::InvalidCoordinate { index: 1, .. }));
    }

    #[test]
    fn test_exact_limit_enforced() {
        let options = PlanOptions {
            max_exact_points: 3,
            ..PlanOptions::default()
        };
        let request = RouteRequest::new(square(), Strategy::Dynamic);
        let err = plan_route(&request, &options).unwrap_err();
        assert_eq!(err, PlanError::TooManyPoints { count: 4, limit: 3 });

        // The heuristic has no such limit.
        let request = RouteRequest::new(square(), Strategy::Greedy);
        assert!(plan_route(&request, &options).is_ok());
    }

    #[test]
    fn test_default_route_name() {
        let request = RouteRequest::new(square(), Strategy::Greedy);
        let plan = plan_route(&request, &PlanOptions::default()).unwrap();
        assert_eq!(plan.route_name, DEFAULT_ROUTE_NAME);

        let plan = plan_route(&request.named("Morning loop"), &PlanOptions::default()).unwrap();
        assert_eq!(plan.route_name, "Morning loop");
    }

    #[test]
    fn test_plan_reports_strategy_and_timing() {
        let request = RouteRequest::new(square(), Strategy::Dynamic);
        let plan = plan_route(&request, &PlanOptions::default()).unwrap();
        assert_eq!(plan.algorithm, Strategy::Dynamic);
        assert_eq!(plan.path.len(), 4);
        assert!(plan.distance > 0.0);
        assert!(plan.execution_time_ms >= 0.0);
    }

    #[test]
    fn test_plan_routes_keeps_order() {
        let requests = vec![
            RouteRequest::new(square(), Strategy::Dynamic).named("first"),
            RouteRequest::new(vec![Point::new("solo", 0.0, 0.0)], Strategy::Greedy),
            RouteRequest::new(square(), Strategy::Greedy).named("third"),
        ];
        let results = plan_routes(&requests, &PlanOptions::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().route_name, "first");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().route_name, "third");
    }
}
