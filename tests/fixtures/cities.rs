//! City coordinates for realistic tour fixtures.

use tour_planner::point::Point;

/// A named city with coordinates in decimal degrees.
#[derive(Debug, Clone)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl City {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.name, self.lat, self.lon)
    }
}

// ============================================================================
// European capitals (dense, short hops)
// ============================================================================

pub const EUROPE: &[City] = &[
    City::new("Paris", 48.8566, 2.3522),
    City::new("London", 51.5074, -0.1278),
    City::new("Berlin", 52.5200, 13.4050),
    City::new("Madrid", 40.4168, -3.7038),
    City::new("Rome", 41.9028, 12.4964),
    City::new("Vienna", 48.2082, 16.3738),
    City::new("Amsterdam", 52.3676, 4.9041),
    City::new("Prague", 50.0755, 14.4378),
    City::new("Warsaw", 52.2297, 21.0122),
    City::new("Lisbon", 38.7223, -9.1393),
    City::new("Stockholm", 59.3293, 18.0686),
    City::new("Budapest", 47.4979, 19.0402),
];

// ============================================================================
// Worldwide (long hops, both hemispheres, across the antimeridian)
// ============================================================================

pub const WORLD: &[City] = &[
    City::new("Tokyo", 35.6762, 139.6503),
    City::new("Sydney", -33.8688, 151.2093),
    City::new("New York", 40.7128, -74.0060),
    City::new("Sao Paulo", -23.5505, -46.6333),
    City::new("Cairo", 30.0444, 31.2357),
    City::new("Anchorage", 61.2181, -149.9003),
    City::new("Auckland", -36.8485, 174.7633),
    City::new("Honolulu", 21.3069, -157.8583),
];

pub fn points(cities: &[City]) -> Vec<Point> {
    cities.iter().map(City::to_point).collect()
}

/// Unit-degree square at the equator, listed in perimeter order.
pub fn unit_square() -> Vec<Point> {
    vec![
        Point::new("A", 0.0, 0.0),
        Point::new("B", 0.0, 1.0),
        Point::new("C", 1.0, 1.0),
        Point::new("D", 1.0, 0.0),
    ]
}
