//! Strong-stability-preserving Runge-Kutta, third order
//!
//! Shu-Osher form, each stage a convex combination of Forward Euler steps:
//!
//! ```text
//! u⁽¹⁾     = u_n + dt R(u_n)
//! u⁽²⁾     = 3/4 u_n + 1/4 (u⁽¹⁾ + dt R(u⁽¹⁾))
//! u_{n+1}  = 1/3 u_n + 2/3 (u⁽²⁾ + dt R(u⁽²⁾))
//! ```
//!
//! Any monotonicity the Forward Euler step has under a CFL limit carries
//! over to the full step under the same limit.

use crate::error::FvmResult;
use crate::physics::Solution;
use crate::solver::methods::offset_into;
use crate::solver::{self, SemiDiscreteEquation, TimeIntegralMethod};

/// Third-order SSP Runge-Kutta time integral method
#[derive(Debug, Clone, Copy, Default)]
pub struct SspRk3;

impl TimeIntegralMethod for SspRk3 {
    fn name(&self) -> &str {
        "SSP-RK3"
    }

    fn stages(&self) -> usize {
        3
    }

    fn update_solutions(
        &self,
        semi_discrete_eq: &SemiDiscreteEquation,
        solutions: &mut [Solution],
        dt: f64,
    ) -> FvmResult<()> {
        let mut rhs = semi_discrete_eq.rhs(solutions);
        let mut stage: Vec<Solution> = solutions.to_vec();

        // u1 = u + dt R(u)
        offset_into(&mut stage, solutions, &rhs, dt);

        // u2 = 3/4 u + 1/4 (u1 + dt R(u1))
        semi_discrete_eq.calculate_rhs(&stage, &mut rhs);
        for ((s, u), r) in stage.iter_mut().zip(solutions.iter()).zip(&rhs) {
            s.axpy(dt, r, 1.0);
            s.axpy(0.75, u, 0.25);
        }

        // u_{n+1} = 1/3 u + 2/3 (u2 + dt R(u2))
        semi_discrete_eq.calculate_rhs(&stage, &mut rhs);
        for ((u, s), r) in solutions.iter_mut().zip(stage.iter_mut()).zip(&rhs) {
            s.axpy(dt, r, 1.0);
            u.axpy(2.0 / 3.0, s, 1.0 / 3.0);
        }

        solver::validate_solutions(solutions)
    }
}
