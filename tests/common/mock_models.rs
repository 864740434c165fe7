//! Mock governing equations for testing
//!
//! These models have known analytical behavior, making them
//! ideal for validating the face assembler and the time integrators.

use fvm_rs::physics::{GoverningEquation, Solution, SpaceVector};
use nalgebra::DMatrix;

// =================================================================================================
// Split advection: two decoupled scalars
// =================================================================================================

/// Two passive scalars transported at different speeds in 1D
///
/// ```text
/// ∂u₀/∂t + a₀ ∂u₀/∂x = 0
/// ∂u₁/∂t + a₁ ∂u₁/∂x = 0
/// ```
///
/// The system has two conserved quantities, so the upwind flux rejects it;
/// Rusanov uses `max(|a₀|, |a₁|)` as dissipation speed.
pub struct SplitAdvection {
    pub speeds: [f64; 2],
}

impl SplitAdvection {
    pub fn new(first: f64, second: f64) -> Self {
        Self { speeds: [first, second] }
    }
}

impl GoverningEquation for SplitAdvection {
    fn name(&self) -> &str {
        "SplitAdvection"
    }

    fn num_equations(&self) -> usize {
        2
    }

    fn space_dimension(&self) -> usize {
        1
    }

    fn physical_flux(&self, state: &Solution) -> DMatrix<f64> {
        DMatrix::from_column_slice(2, 1, &[self.speeds[0] * state[0], self.speeds[1] * state[1]])
    }

    fn characteristic_speed(&self, _state: &Solution, direction: &SpaceVector) -> Option<f64> {
        let projected = self.speeds.map(|a| a * direction[0]);
        Some(projected[0].abs().max(projected[1].abs()))
    }
}

// =================================================================================================
// Three-cell upwind advection: exact semi-discrete solution
// =================================================================================================

/// Exact solution of the semi-discrete three-cell upwind problem
///
/// With unit speed, unit cells and `u(0) = [1, 0, 0]` the residual is linear:
///
/// ```text
/// du₀/dt = -u₀
/// du₁/dt =  u₀ - u₁
/// du₂/dt =  u₁
/// ```
///
/// whose solution is `[e^{-t}, t e^{-t}, 1 - e^{-t} - t e^{-t}]`.
pub fn three_cell_exact(t: f64) -> [f64; 3] {
    let decay = (-t).exp();
    [decay, t * decay, 1.0 - decay - t * decay]
}
