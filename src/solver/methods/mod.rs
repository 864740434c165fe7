//! Explicit time integral methods
//!
//! This module contains concrete implementations of the
//! [`TimeIntegralMethod`](crate::solver::TimeIntegralMethod) trait.
//!
//! # Available Methods
//!
//! - **[`ForwardEuler`]**: Forward Euler
//!   - Order: First-order O(dt)
//!   - Cost: 1 residual evaluation per step
//!
//! - **[`SspRk3`]**: strong-stability-preserving Runge-Kutta (Shu-Osher form)
//!   - Order: Third-order O(dt³)
//!   - Cost: 3 residual evaluations per step
//!   - Keeps the TVD property of the first-order scheme at the same CFL
//!
//! - **[`Rk4`]**: classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dt⁴)
//!   - Cost: 4 residual evaluations per step
//!
//! Every method updates the solution array in place, never resizes it, and
//! checks the result for NaN / Inf before returning.

mod euler;
mod rk4;
mod ssprk;

pub use euler::ForwardEuler;
pub use rk4::Rk4;
pub use ssprk::SspRk3;

use crate::physics::Solution;
use nalgebra::DVector;

/// `out[i] = base[i] + scale * increment[i]`
pub(crate) fn offset_into(out: &mut [Solution], base: &[Solution], increment: &[DVector<f64>], scale: f64) {
    for ((target, u), k) in out.iter_mut().zip(base).zip(increment) {
        target.copy_from(u);
        target.axpy(scale, k, 1.0);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
