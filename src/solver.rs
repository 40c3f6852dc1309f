//! Closed-tour solvers.
//!
//! Both strategies fix the first input point as the start, visit every
//! point exactly once and return to the start. Ties are always broken in
//! favour of the lowest index (strict `<` over a left-to-right scan), so a
//! given input order always yields the same tour.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::haversine::HaversineMatrix;
use crate::traits::{DistanceMatrixProvider, Waypoint};

/// Predecessor marker for DP states never reached by a transition.
const NO_PARENT: usize = usize::MAX;

/// Tour construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Strategy {
    /// Nearest-neighbor heuristic, O(n²).
    #[default]
    Greedy,
    /// Exact Held-Karp dynamic program, O(n²·2ⁿ) time and O(n·2ⁿ) memory.
    Dynamic,
}

impl Strategy {
    /// Interpret a caller-supplied algorithm flag.
    ///
    /// Only `"dynamic"` selects the exact solver; anything else, including
    /// unknown values, falls back to the heuristic.
    pub fn from_flag(flag: &str) -> Self {
        match flag {
            "dynamic" => Strategy::Dynamic,
            _ => Strategy::Greedy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Greedy => "greedy",
            Strategy::Dynamic => "dynamic",
        }
    }
}

impl From<Option<String>> for Strategy {
    fn from(flag: Option<String>) -> Self {
        flag.as_deref().map(Strategy::from_flag).unwrap_or_default()
    }
}

/// A solved tour: the input records in visiting order plus the closed
/// tour length in kilometers (closing edge included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour<T> {
    pub path: Vec<T>,
    pub total_distance: f64,
}

impl<T: Clone> Tour<T> {
    fn trivial(points: &[T]) -> Self {
        Self {
            path: points.to_vec(),
            total_distance: 0.0,
        }
    }

    fn from_order(points: &[T], order: &[usize], total_distance: f64) -> Self {
        Self {
            path: order.iter().map(|&i| points[i].clone()).collect(),
            total_distance,
        }
    }
}

/// Solve with the selected strategy using haversine distances.
pub fn solve<T>(points: &[T], strategy: Strategy) -> Tour<T>
where
    T: Waypoint + Clone,
{
    match strategy {
        Strategy::Greedy => solve_heuristic(points),
        Strategy::Dynamic => solve_exact(points),
    }
}

/// Nearest-neighbor tour using haversine distances.
pub fn solve_heuristic<T>(points: &[T]) -> Tour<T>
where
    T: Waypoint + Clone,
{
    solve_heuristic_with(points, &HaversineMatrix)
}

/// Nearest-neighbor tour over distances from `provider`.
///
/// Greedy and never backtracks, so the result is not guaranteed optimal.
pub fn solve_heuristic_with<T, M>(points: &[T], provider: &M) -> Tour<T>
where
    T: Waypoint + Clone,
    M: DistanceMatrixProvider,
{
    if points.len() < 2 {
        return Tour::trivial(points);
    }

    let matrix = provider.matrix_for(&locations(points));
    let (order, total_distance) = nearest_neighbor_order(&matrix);

    debug!(
        points = points.len(),
        distance_km = total_distance,
        "nearest-neighbor tour built"
    );

    Tour::from_order(points, &order, total_distance)
}

/// Optimal tour using haversine distances.
///
/// # Panics
///
/// Panics if the `n·2ⁿ` state table cannot be addressed in `usize`. Memory
/// runs out well before that, so callers must bound `n` themselves; around
/// 20 points is the practical limit.
pub fn solve_exact<T>(points: &[T]) -> Tour<T>
where
    T: Waypoint + Clone,
{
    solve_exact_with(points, &HaversineMatrix)
}

/// Optimal tour over distances from `provider`.
///
/// # Panics
///
/// See [`solve_exact`].
pub fn solve_exact_with<T, M>(points: &[T], provider: &M) -> Tour<T>
where
    T: Waypoint + Clone,
    M: DistanceMatrixProvider,
{
    let n = points.len();
    if n < 2 {
        return Tour::trivial(points);
    }

    let matrix = provider.matrix_for(&locations(points));
    let table = HeldKarpTable::fill(&matrix);

    let (order, total_distance) = match table.close(&matrix) {
        Some((last, cost)) => (table.backtrace(last), cost),
        None => {
            // Only reachable when distances are NaN or infinite.
            warn!(points = n, "no finite closed tour; returning input order");
            let order: Vec<usize> = (0..n).collect();
            let cost = order_length(&matrix, &order);
            (order, cost)
        }
    };

    debug!(
        points = n,
        states = table.cost.len(),
        distance_km = total_distance,
        "Held-Karp tour solved"
    );

    Tour::from_order(points, &order, total_distance)
}

fn locations<T: Waypoint>(points: &[T]) -> Vec<(f64, f64)> {
    points.iter().map(|point| point.location()).collect()
}

/// Length of the closed tour visiting `order`, closing edge included.
fn order_length(matrix: &[Vec<f64>], order: &[usize]) -> f64 {
    let n = order.len();
    (0..n)
        .map(|i| matrix[order[i]][order[(i + 1) % n]])
        .sum()
}

// ============================================================================
// Nearest Neighbor
// ============================================================================

fn nearest_neighbor_order(matrix: &[Vec<f64>]) -> (Vec<usize>, f64) {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut total = 0.0;

    visited[0] = true;
    order.push(0);
    let mut last = 0;

    for _ in 1..n {
        let (next, step) = nearest_unvisited(&matrix[last], &visited);
        trace!(from = last, to = next, step_km = step, "nearest-neighbor step");

        visited[next] = true;
        order.push(next);
        total += step;
        last = next;
    }

    total += matrix[last][0];
    (order, total)
}

/// First unvisited index with the strictly smallest distance in `row`.
///
/// The first unvisited index seeds the scan, so a pick is always made even
/// when distances are NaN.
fn nearest_unvisited(row: &[f64], visited: &[bool]) -> (usize, f64) {
    let mut best: Option<(usize, f64)> = None;
    for (j, &distance) in row.iter().enumerate() {
        if visited[j] {
            continue;
        }
        match best {
            Some((_, best_distance)) if !(distance < best_distance) => {}
            _ => best = Some((j, distance)),
        }
    }
    // Callers only ask while some point is unvisited.
    best.unwrap_or((0, f64::NAN))
}

// ============================================================================
// Held-Karp
// ============================================================================

/// Dense `dp[mask][last]` table stored flat at `mask * n + last`.
///
/// `cost` holds the cheapest path that starts at point 0, visits exactly
/// `mask` and ends at `last`; `parent` holds the point visited just before.
struct HeldKarpTable {
    n: usize,
    cost: Vec<f64>,
    parent: Vec<usize>,
}

impl HeldKarpTable {
    /// Fill every state in increasing mask order. A mask is only reached
    /// from a strictly smaller one, so each state is final when visited.
    fn fill(matrix: &[Vec<f64>]) -> Self {
        let n = matrix.len();
        let masks = (n < usize::BITS as usize).then(|| 1usize << n);
        let Some(states) = masks.and_then(|masks| masks.checked_mul(n)) else {
            panic!("exact solver cannot address 2^{n} subsets");
        };
        let masks = states / n;

        let mut table = Self {
            n,
            cost: vec![f64::INFINITY; states],
            parent: vec![NO_PARENT; states],
        };
        let start = table.index(1, 0);
        table.cost[start] = 0.0;

        for mask in 1..masks {
            // Every reachable state contains the start.
            if mask & 1 == 0 {
                continue;
            }
            for curr in 0..n {
                if mask & (1 << curr) == 0 {
                    continue;
                }
                let base = table.cost[table.index(mask, curr)];
                if !base.is_finite() {
                    continue;
                }
                for next in 0..n {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let target = table.index(mask | (1 << next), next);
                    let candidate = base + matrix[curr][next];
                    if candidate < table.cost[target] {
                        table.cost[target] = candidate;
                        table.parent[target] = curr;
                    }
                }
            }
        }

        trace!(points = n, states, "Held-Karp table filled");
        table
    }

    #[inline]
    fn index(&self, mask: usize, last: usize) -> usize {
        mask * self.n + last
    }

    fn full_mask(&self) -> usize {
        (1 << self.n) - 1
    }

    /// Cheapest way to close the tour back to point 0: the final point and
    /// the total cost. First minimum wins.
    fn close(&self, matrix: &[Vec<f64>]) -> Option<(usize, f64)> {
        let full = self.full_mask();
        let mut best: Option<(usize, f64)> = None;
        let mut best_cost = f64::INFINITY;

        for last in 1..self.n {
            let cost = self.cost[self.index(full, last)] + matrix[last][0];
            if cost < best_cost {
                best_cost = cost;
                best = Some((last, cost));
            }
        }

        best
    }

    /// Walk predecessor links from `last` with the full mask back to the
    /// start, yielding the visiting order beginning at point 0.
    fn backtrace(&self, last: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.n);
        let mut mask = self.full_mask();
        let mut curr = last;

        while curr != 0 {
            order.push(curr);
            let prev = self.parent[self.index(mask, curr)];
            debug_assert_ne!(prev, NO_PARENT, "finite state without predecessor");
            mask &= !(1 << curr);
            curr = prev;
        }

        order.push(0);
        order.reverse();
        order
    }
}
