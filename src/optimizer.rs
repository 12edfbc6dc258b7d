//! Stop ordering.
//!
//! The default is a greedy nearest-neighbor tour. It is a heuristic: fast and
//! deterministic for the single-digit to low-tens stop counts errand lists
//! have, but not guaranteed to be the shortest tour.

use tracing::debug;

use crate::haversine::HaversineMatrix;
use crate::traits::{DistanceMatrixProvider, OrderingStrategy};

/// Greedy nearest-neighbor ordering over a distance matrix.
#[derive(Debug, Clone, Default)]
pub struct NearestNeighbor<M = HaversineMatrix> {
    provider: M,
}

impl<M: DistanceMatrixProvider> NearestNeighbor<M> {
    pub fn new(provider: M) -> Self {
        Self { provider }
    }
}

impl<M: DistanceMatrixProvider> OrderingStrategy for NearestNeighbor<M> {
    fn order(&self, points: &[(f64, f64)], start: Option<(f64, f64)>) -> Vec<usize> {
        if points.is_empty() {
            return Vec::new();
        }

        let anchor = Anchor::new(points, start);
        let matrix = self.provider.matrix_for(&anchor.locations);
        let n = points.len();

        let mut visited = vec![false; n];
        let mut order = Vec::with_capacity(n);

        let mut current = match anchor.start_index() {
            Some(start_idx) => start_idx,
            None => {
                visited[0] = true;
                order.push(0);
                anchor.location_index(0)
            }
        };

        while order.len() < n {
            let mut nearest: Option<(usize, f64)> = None;
            for (task_idx, _) in visited.iter().enumerate().filter(|(_, seen)| !**seen) {
                let distance = matrix[current][anchor.location_index(task_idx)];
                // Strict comparison keeps the earliest input on ties.
                if nearest.is_none_or(|(_, best)| distance < best) {
                    nearest = Some((task_idx, distance));
                }
            }

            let Some((next, _)) = nearest else { break };
            visited[next] = true;
            order.push(next);
            current = anchor.location_index(next);
        }

        order
    }
}

/// Runs a base strategy, then applies 2-opt segment reversals while they
/// strictly shorten the open path.
#[derive(Debug, Clone)]
pub struct TwoOptRefinement<S, M = HaversineMatrix> {
    base: S,
    provider: M,
    max_iterations: usize,
}

impl<S> TwoOptRefinement<S> {
    pub fn new(base: S, max_iterations: usize) -> Self {
        Self {
            base,
            provider: HaversineMatrix,
            max_iterations,
        }
    }
}

impl<S, M> TwoOptRefinement<S, M> {
    pub fn with_provider(base: S, provider: M, max_iterations: usize) -> Self {
        Self {
            base,
            provider,
            max_iterations,
        }
    }
}

impl<S, M> OrderingStrategy for TwoOptRefinement<S, M>
where
    S: OrderingStrategy,
    M: DistanceMatrixProvider,
{
    fn order(&self, points: &[(f64, f64)], start: Option<(f64, f64)>) -> Vec<usize> {
        let mut order = self.base.order(points, start);
        if order.len() < 3 {
            return order;
        }

        let anchor = Anchor::new(points, start);
        let matrix = self.provider.matrix_for(&anchor.locations);
        let mut cost = path_cost(&order, &anchor, &matrix);

        for iteration in 0..self.max_iterations {
            match two_opt_improve(&mut order, &anchor, &matrix, cost) {
                Some(improved) => cost = improved,
                None => {
                    debug!(iteration, cost_km = cost, "2-opt converged");
                    break;
                }
            }
        }

        order
    }
}

/// Reverse the first segment whose reversal shortens the path.
/// Returns the new cost if an improvement was made.
fn two_opt_improve(
    order: &mut [usize],
    anchor: &Anchor,
    matrix: &[Vec<f64>],
    current_cost: f64,
) -> Option<f64> {
    let n = order.len();
    for i in 0..n - 1 {
        for j in i + 1..n {
            order[i..=j].reverse();
            let cost = path_cost(order, anchor, matrix);
            if cost < current_cost - 1e-9 {
                return Some(cost);
            }
            order[i..=j].reverse();
        }
    }
    None
}

fn path_cost(order: &[usize], anchor: &Anchor, matrix: &[Vec<f64>]) -> f64 {
    let mut cost = 0.0;
    let mut previous = anchor.start_index();
    for &task_idx in order {
        let here = anchor.location_index(task_idx);
        if let Some(prev) = previous {
            cost += matrix[prev][here];
        }
        previous = Some(here);
    }
    cost
}

/// Matrix layout: the optional start occupies slot 0, tasks follow.
struct Anchor {
    locations: Vec<(f64, f64)>,
    has_start: bool,
}

impl Anchor {
    fn new(points: &[(f64, f64)], start: Option<(f64, f64)>) -> Self {
        let mut locations = Vec::with_capacity(points.len() + 1);
        locations.extend(start);
        locations.extend_from_slice(points);
        Self {
            locations,
            has_start: start.is_some(),
        }
    }

    fn start_index(&self) -> Option<usize> {
        self.has_start.then_some(0)
    }

    fn location_index(&self, task_idx: usize) -> usize {
        if self.has_start { task_idx + 1 } else { task_idx }
    }
}
