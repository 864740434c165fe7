//! Linear scalar advection
//!
//! # Mathematical Background
//!
//! ```text
//! ∂u/∂t + ∇·(a u) = 0
//! ```
//!
//! Where **a** is a constant advection velocity. The physical flux is
//! `F(u) = a u`, and the single characteristic travels with speed `a·n`
//! along any direction `n`. The exact solution is a pure translation of the
//! initial profile, which makes the model the reference case for checking
//! upwind differencing and CFL bounds.

use crate::physics::{GoverningEquation, Solution, SpaceVector};
use nalgebra::{DMatrix, DVector};

/// Linear advection with a constant velocity
///
/// # Example
///
/// ```rust
/// use fvm_rs::models::LinearAdvection;
/// use fvm_rs::physics::GoverningEquation;
///
/// let equation = LinearAdvection::new(vec![1.0, 0.5]);
/// assert_eq!(equation.space_dimension(), 2);
/// assert_eq!(equation.num_equations(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LinearAdvection {
    velocity: DVector<f64>,
}

impl LinearAdvection {
    /// Create an advection equation from its velocity components
    ///
    /// # Panics
    ///
    /// Panics if `velocity` is empty or contains non-finite components.
    pub fn new(velocity: Vec<f64>) -> Self {
        assert!(!velocity.is_empty(), "Advection velocity needs at least one component");
        assert!(
            velocity.iter().all(|v| v.is_finite()),
            "Advection velocity must be finite, got {:?}",
            velocity
        );

        Self {
            velocity: DVector::from_vec(velocity),
        }
    }

    /// Advection velocity
    pub fn velocity(&self) -> &DVector<f64> {
        &self.velocity
    }
}

impl GoverningEquation for LinearAdvection {
    fn name(&self) -> &str {
        "Linear Advection"
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn space_dimension(&self) -> usize {
        self.velocity.len()
    }

    fn physical_flux(&self, state: &Solution) -> DMatrix<f64> {
        // 1 × dim row: u * aᵀ
        DMatrix::from_iterator(1, self.velocity.len(), self.velocity.iter().map(|a| a * state[0]))
    }

    fn characteristic_speed(&self, _state: &Solution, direction: &SpaceVector) -> Option<f64> {
        Some(self.velocity.dot(direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_physical_flux_shape() {
        let equation = LinearAdvection::new(vec![2.0, -1.0, 0.5]);
        let flux = equation.physical_flux(&DVector::from_vec(vec![4.0]));

        assert_eq!(flux.shape(), (1, 3));
        assert_eq!(flux[(0, 0)], 8.0);
        assert_eq!(flux[(0, 1)], -4.0);
        assert_eq!(flux[(0, 2)], 2.0);
    }

    #[test]
    fn test_characteristic_speed_is_projected_velocity() {
        let equation = LinearAdvection::new(vec![3.0, 4.0]);
        let state = DVector::from_vec(vec![10.0]);
        let normal = DVector::from_vec(vec![0.6, 0.8]);

        assert_relative_eq!(
            equation.characteristic_speed(&state, &normal).unwrap(),
            5.0,
            epsilon = 1e-14
        );
        assert_relative_eq!(equation.max_wave_speed(&state, &(-normal)), 5.0, epsilon = 1e-14);
    }

    #[test]
    fn test_coordinate_wave_speeds() {
        let equation = LinearAdvection::new(vec![-2.0, 1.0]);
        let speeds = equation.coordinate_wave_speeds(&DVector::from_vec(vec![0.0]));
        assert_eq!(speeds.as_slice(), &[2.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "at least one component")]
    fn test_empty_velocity_panics() {
        LinearAdvection::new(vec![]);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn test_nan_velocity_panics() {
        LinearAdvection::new(vec![f64::NAN]);
    }
}
