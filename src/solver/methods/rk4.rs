//! Classical fourth-order Runge-Kutta time integration
//!
//! # Mathematical Background
//!
//! ```text
//! k1 = R(u_n)
//! k2 = R(u_n + dt/2 * k1)
//! k3 = R(u_n + dt/2 * k2)
//! k4 = R(u_n + dt * k3)
//!
//! u_{n+1} = u_n + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (error ~ O(dt⁴))
//! - **Stability**: imaginary-axis stability interval up to 2√2, so it is
//!   usable with central-type fluxes where Forward Euler is not
//! - **Complexity**: 4 residual evaluations per step
//! - **Memory**: one stage array, one residual array, one accumulator
//!
//! Not strong-stability-preserving: with limiters or shocks prefer
//! [`SspRk3`](super::SspRk3).

use crate::error::FvmResult;
use crate::physics::Solution;
use crate::solver::methods::offset_into;
use crate::solver::{self, SemiDiscreteEquation, TimeIntegralMethod};

/// Classical RK4 time integral method
///
/// # Example
///
/// ```rust
/// use fvm_rs::solver::{Rk4, TimeIntegralMethod};
///
/// assert_eq!(Rk4.name(), "Runge-Kutta 4");
/// assert_eq!(Rk4.stages(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rk4;

impl TimeIntegralMethod for Rk4 {
    fn name(&self) -> &str {
        "Runge-Kutta 4"
    }

    fn stages(&self) -> usize {
        4
    }

    fn update_solutions(
        &self,
        semi_discrete_eq: &SemiDiscreteEquation,
        solutions: &mut [Solution],
        dt: f64,
    ) -> FvmResult<()> {
        // ====== k1 ======
        let mut k = semi_discrete_eq.rhs(solutions);
        let mut increment = k.clone();
        let mut stage: Vec<Solution> = solutions.to_vec();

        // ====== k2, k3 ======
        for _ in 0..2 {
            offset_into(&mut stage, solutions, &k, 0.5 * dt);
            semi_discrete_eq.calculate_rhs(&stage, &mut k);
            for (sum, ki) in increment.iter_mut().zip(&k) {
                sum.axpy(2.0, ki, 1.0);
            }
        }

        // ====== k4 ======
        offset_into(&mut stage, solutions, &k, dt);
        semi_discrete_eq.calculate_rhs(&stage, &mut k);
        for (sum, ki) in increment.iter_mut().zip(&k) {
            *sum += ki;
        }

        // ====== Combine ======
        for (u, sum) in solutions.iter_mut().zip(&increment) {
            u.axpy(dt / 6.0, sum, 1.0);
        }

        solver::validate_solutions(solutions)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
