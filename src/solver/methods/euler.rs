//! Forward Euler time integration
//!
//! # Mathematical Background
//!
//! For the semi-discrete system `du/dt = R(u)` the Forward Euler update is
//!
//! ```text
//! u_{n+1} = u_n + dt * R(u_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(dt))
//! - **Stability**: Conditionally stable, CFL ≤ 1 with first-order upwind
//! - **Complexity**: 1 residual evaluation per step
//! - **Memory**: one residual array
//!
//! # When to Use
//!
//! - Reference runs and architecture tests
//! - Pairing with first-order fluxes, where higher temporal order buys little
//!
//! For smooth solutions prefer [`SspRk3`](super::SspRk3) or [`Rk4`](super::Rk4).

use crate::error::FvmResult;
use crate::physics::Solution;
use crate::solver::{self, SemiDiscreteEquation, TimeIntegralMethod};

/// Forward Euler time integral method
///
/// # Example
///
/// ```rust
/// use fvm_rs::solver::{ForwardEuler, TimeIntegralMethod};
///
/// let method = ForwardEuler;
/// assert_eq!(method.name(), "Forward Euler");
/// assert_eq!(method.stages(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl TimeIntegralMethod for ForwardEuler {
    fn name(&self) -> &str {
        "Forward Euler"
    }

    fn stages(&self) -> usize {
        1
    }

    fn update_solutions(
        &self,
        semi_discrete_eq: &SemiDiscreteEquation,
        solutions: &mut [Solution],
        dt: f64,
    ) -> FvmResult<()> {
        // R(u_n)
        let rhs = semi_discrete_eq.rhs(solutions);

        // u_{n+1} = u_n + dt * R(u_n)
        for (u, r) in solutions.iter_mut().zip(&rhs) {
            u.axpy(dt, r, 1.0);
        }

        solver::validate_solutions(solutions)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
