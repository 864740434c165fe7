//! Helper functions for integration tests

use fvm_rs::mesh::{Grid, InnerFaceConnectivity};
use fvm_rs::physics::Solution;
use nalgebra::DVector;

/// One scalar state per value
pub fn scalar_solutions(values: &[f64]) -> Vec<Solution> {
    values.iter().map(|&v| DVector::from_vec(vec![v])).collect()
}

/// First component of every cell
pub fn flatten_scalar(solutions: &[Solution]) -> Vec<f64> {
    solutions.iter().map(|s| s[0]).collect()
}

/// `Σ_i V_i u_i`, per conserved quantity
pub fn total_mass(volumes: &[f64], solutions: &[Solution]) -> DVector<f64> {
    let num_equations = solutions.first().map_or(0, |s| s.len());
    solutions
        .iter()
        .zip(volumes)
        .fold(DVector::zeros(num_equations), |sum, (u, volume)| sum + u * *volume)
}

/// `num_cells` cells of width `dx` on a ring
///
/// Same faces as [`Grid::uniform_line`], plus a face joining the last cell
/// (owner) to the first (neighbor).
pub fn periodic_line(num_cells: usize, dx: f64) -> Grid {
    let faces = InnerFaceConnectivity::new(
        vec![DVector::from_vec(vec![1.0]); num_cells],
        (0..num_cells).map(|i| (i, (i + 1) % num_cells)).collect(),
        vec![1.0; num_cells],
    );
    Grid::new(1, vec![dx; num_cells], faces).unwrap()
}

/// Assert that two solution arrays are close (within tolerance)
pub fn assert_solutions_close(actual: &[Solution], expected: &[Solution], tolerance: f64, message: &str) {
    assert_eq!(actual.len(), expected.len(), "{}: cell count mismatch", message);

    for (cell, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a.len(), e.len(), "{}: cell {} dimension mismatch", message, cell);
        for (k, (&va, &ve)) in a.iter().zip(e.iter()).enumerate() {
            let diff = (va - ve).abs();
            assert!(
                diff < tolerance,
                "{}: cell {} component {} differs by {} (tolerance {})",
                message, cell, k, diff, tolerance
            );
        }
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
