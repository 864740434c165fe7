//! Numerical flux functions
//!
//! A numerical flux approximates `F(u)·n` at a face from the two face-side
//! states. Every implementation must be *consistent*: for equal states
//! `u_L = u_R = u` it reduces to the physical flux `F(u)·n`.
//!
//! | Flux | Equations | Dissipation |
//! |------|-----------|-------------|
//! | [`Upwind`] | scalar only | minimal |
//! | [`Rusanov`] | any | `½ λ_max (u_R - u_L)` |

use crate::error::{FvmError, FvmResult};
use crate::physics::{GoverningEquation, Solution, SpaceVector};
use nalgebra::DVector;

/// Face flux strategy
pub trait NumericalFlux: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Reject governing equations this flux cannot handle
    fn check_compatibility(&self, equation: &dyn GoverningEquation) -> FvmResult<()> {
        let _ = equation;
        Ok(())
    }

    /// Flux through a face with unit normal `normal` oriented left → right
    fn calculate(
        &self,
        equation: &dyn GoverningEquation,
        left: &Solution,
        right: &Solution,
        normal: &SpaceVector,
    ) -> DVector<f64>;
}

// =================================================================================================
// Upwind
// =================================================================================================

/// Upwind flux for scalar conservation laws
///
/// The characteristic speed `s = F'(ū)·n` is evaluated at the face-average
/// state `ū = ½(u_L + u_R)`; the flux is taken from the side the
/// characteristic comes from:
///
/// ```text
/// F* = F(u_L)·n   if s ≥ 0
/// F* = F(u_R)·n   otherwise
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Upwind;

impl NumericalFlux for Upwind {
    fn name(&self) -> &str {
        "Upwind"
    }

    fn check_compatibility(&self, equation: &dyn GoverningEquation) -> FvmResult<()> {
        if equation.is_scalar() {
            Ok(())
        } else {
            Err(FvmError::config(format!(
                "Upwind flux requires a scalar equation, {} has {} equations",
                equation.name(),
                equation.num_equations()
            )))
        }
    }

    fn calculate(
        &self,
        equation: &dyn GoverningEquation,
        left: &Solution,
        right: &Solution,
        normal: &SpaceVector,
    ) -> DVector<f64> {
        let average = (left + right) * 0.5;
        let speed = equation.characteristic_speed(&average, normal).unwrap_or(0.0);

        if speed >= 0.0 {
            equation.normal_flux(left, normal)
        } else {
            equation.normal_flux(right, normal)
        }
    }
}

// =================================================================================================
// Rusanov
// =================================================================================================

/// Rusanov (local Lax-Friedrichs) flux
///
/// ```text
/// F* = ½ (F(u_L)·n + F(u_R)·n) - ½ λ (u_R - u_L)
/// λ  = max(λ_max(u_L, n), λ_max(u_R, n))
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rusanov;

impl NumericalFlux for Rusanov {
    fn name(&self) -> &str {
        "Rusanov"
    }

    fn calculate(
        &self,
        equation: &dyn GoverningEquation,
        left: &Solution,
        right: &Solution,
        normal: &SpaceVector,
    ) -> DVector<f64> {
        let flux_left = equation.normal_flux(left, normal);
        let flux_right = equation.normal_flux(right, normal);
        let lambda = equation
            .max_wave_speed(left, normal)
            .max(equation.max_wave_speed(right, normal));

        (flux_left + flux_right) * 0.5 - (right - left) * (0.5 * lambda)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Burgers, LinearAdvection};
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn scalar(value: f64) -> Solution {
        DVector::from_vec(vec![value])
    }

    /// Two-component system, only used to exercise compatibility checks
    struct MockSystem;

    impl GoverningEquation for MockSystem {
        fn name(&self) -> &str {
            "MockSystem"
        }
        fn num_equations(&self) -> usize {
            2
        }
        fn space_dimension(&self) -> usize {
            1
        }
        fn physical_flux(&self, state: &Solution) -> DMatrix<f64> {
            DMatrix::from_column_slice(2, 1, state.as_slice())
        }
        fn characteristic_speed(&self, _state: &Solution, _direction: &SpaceVector) -> Option<f64> {
            None
        }
        fn max_wave_speed(&self, _state: &Solution, _direction: &SpaceVector) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_upwind_takes_left_state_for_positive_speed() {
        let equation = LinearAdvection::new(vec![2.0]);
        let normal = DVector::from_vec(vec![1.0]);

        let flux = Upwind.calculate(&equation, &scalar(3.0), &scalar(5.0), &normal);
        assert_relative_eq!(flux[0], 6.0);
    }

    #[test]
    fn test_upwind_takes_right_state_for_negative_speed() {
        let equation = LinearAdvection::new(vec![-2.0]);
        let normal = DVector::from_vec(vec![1.0]);

        let flux = Upwind.calculate(&equation, &scalar(3.0), &scalar(5.0), &normal);
        assert_relative_eq!(flux[0], -10.0);
    }

    #[test]
    fn test_upwind_rejects_systems() {
        let error = Upwind.check_compatibility(&MockSystem).unwrap_err();
        assert!(matches!(error, FvmError::Configuration { .. }));
        assert!(Rusanov.check_compatibility(&MockSystem).is_ok());
    }

    #[test]
    fn test_rusanov_linear_advection_matches_upwind() {
        // For linear advection Rusanov with λ = |a| reduces to upwind
        let equation = LinearAdvection::new(vec![1.5]);
        let normal = DVector::from_vec(vec![1.0]);

        let upwind = Upwind.calculate(&equation, &scalar(2.0), &scalar(-1.0), &normal);
        let rusanov = Rusanov.calculate(&equation, &scalar(2.0), &scalar(-1.0), &normal);
        assert_relative_eq!(upwind[0], rusanov[0], epsilon = 1e-14);
    }

    #[test]
    fn test_rusanov_burgers() {
        let equation = Burgers::new(1);
        let normal = DVector::from_vec(vec![1.0]);

        // ½(½ + 2) - ½·2·(2 - 1) = 0.25
        let flux = Rusanov.calculate(&equation, &scalar(1.0), &scalar(2.0), &normal);
        assert_relative_eq!(flux[0], 0.25, epsilon = 1e-14);
    }

    #[test]
    fn test_consistency_for_equal_states() {
        let equation = LinearAdvection::new(vec![0.3, -1.2]);
        let burgers = Burgers::new(2);
        let normals = [
            DVector::from_vec(vec![1.0, 0.0]),
            DVector::from_vec(vec![0.0, -1.0]),
            DVector::from_vec(vec![0.6, 0.8]),
            DVector::from_vec(vec![-0.8, 0.6]),
        ];

        for value in [-3.0, -0.5, 0.0, 1.0, 7.25] {
            let state = scalar(value);
            for normal in &normals {
                let fluxes: [&dyn NumericalFlux; 2] = [&Upwind, &Rusanov];
                for flux in fluxes {
                    let expected = equation.normal_flux(&state, normal);
                    let actual = flux.calculate(&equation, &state, &state, normal);
                    assert_relative_eq!(actual[0], expected[0], epsilon = 1e-14);

                    let expected = burgers.normal_flux(&state, normal);
                    let actual = flux.calculate(&burgers, &state, &state, normal);
                    assert_relative_eq!(actual[0], expected[0], epsilon = 1e-14);
                }
            }
        }
    }
}
