//! Seams of the planner.
//!
//! Both traits are deliberately small so an alternative distance source or
//! ordering algorithm can be swapped in without touching the planner.

/// Provides a distance matrix (kilometers) for a set of `(lat, lng)` points.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[(f64, f64)]) -> Vec<Vec<f64>>;
}

/// Orders stops into a visiting sequence.
///
/// Returns indices into `points`; every index appears exactly once.
pub trait OrderingStrategy {
    fn order(&self, points: &[(f64, f64)], start: Option<(f64, f64)>) -> Vec<usize>;
}
