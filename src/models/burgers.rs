//! Inviscid Burgers equation
//!
//! ```text
//! ∂u/∂t + ∇·F(u) = 0,   F(u) = (½u², ..., ½u²)
//! ```
//!
//! The flux is the same in every spatial direction, so the characteristic
//! speed along `n` is `u · Σ nᵢ`. Smooth data steepens into shocks in finite
//! time, which exercises the nonlinear paths of the numerical fluxes.

use crate::physics::{GoverningEquation, Solution, SpaceVector};
use nalgebra::DMatrix;

/// Burgers equation in `dimension` space dimensions
#[derive(Debug, Clone, Copy)]
pub struct Burgers {
    dimension: usize,
}

impl Burgers {
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "Burgers equation needs at least one space dimension");
        Self { dimension }
    }
}

impl GoverningEquation for Burgers {
    fn name(&self) -> &str {
        "Burgers"
    }

    fn num_equations(&self) -> usize {
        1
    }

    fn space_dimension(&self) -> usize {
        self.dimension
    }

    fn physical_flux(&self, state: &Solution) -> DMatrix<f64> {
        DMatrix::from_element(1, self.dimension, 0.5 * state[0] * state[0])
    }

    fn characteristic_speed(&self, state: &Solution, direction: &SpaceVector) -> Option<f64> {
        Some(state[0] * direction.sum())
    }
}
