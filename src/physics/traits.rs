//! Governing equation traits and types
//!
//! This module defines the core API for conservation laws:
//! - `GoverningEquation`: trait for all conservation laws
//! - `Solution`: per-cell state vector
//! - `SpaceVector`: geometric vector (normals, directions)

use nalgebra::{DMatrix, DVector};

// =================================================================================================
// State and geometry types
// =================================================================================================

/// Cell-average state of one cell (one entry per conserved quantity)
pub type Solution = DVector<f64>;

/// Geometric vector in physical space (face normals, coordinate directions)
pub type SpaceVector = DVector<f64>;

/// Unit vector along coordinate axis `axis` in `dimension` dimensions
///
/// # Example
/// ```
/// use fvm_rs::physics::unit_axis;
///
/// let e_y = unit_axis(2, 1);
/// assert_eq!(e_y.as_slice(), &[0.0, 1.0]);
/// ```
pub fn unit_axis(dimension: usize, axis: usize) -> SpaceVector {
    let mut direction = DVector::zeros(dimension);
    direction[axis] = 1.0;
    direction
}

// =================================================================================================
// Governing Equation Trait
// =================================================================================================

/// Trait for conservation laws `∂u/∂t + ∇·F(u) = 0`
///
/// # Responsibility
/// Provides the physical flux and wave speeds of the system.
/// Does NOT discretize anything: numerical fluxes, reconstruction and time
/// integration are separate strategies that consume this trait.
///
/// # Shape conventions
/// - states have `num_equations()` entries
/// - normals and directions have `space_dimension()` entries
/// - `physical_flux` is a `num_equations() × space_dimension()` matrix
pub trait GoverningEquation: Send + Sync {
    /// Human-readable name, used in logs and snapshot headers
    fn name(&self) -> &str;

    /// Number of conserved quantities
    fn num_equations(&self) -> usize;

    /// Number of spatial dimensions
    fn space_dimension(&self) -> usize;

    /// Physical flux `F(u)`, one column per spatial direction
    fn physical_flux(&self, state: &Solution) -> DMatrix<f64>;

    /// Signed characteristic speed of a scalar equation along `direction`
    ///
    /// For a scalar law this is `F'(u)·n`. Systems return `None`.
    fn characteristic_speed(&self, state: &Solution, direction: &SpaceVector) -> Option<f64>;

    /// Largest absolute wave speed along `direction`
    fn max_wave_speed(&self, state: &Solution, direction: &SpaceVector) -> f64 {
        self.characteristic_speed(state, direction)
            .map(f64::abs)
            .unwrap_or(0.0)
    }

    /// Physical flux projected on `normal`: `F(u)·n`
    fn normal_flux(&self, state: &Solution, normal: &SpaceVector) -> DVector<f64> {
        self.physical_flux(state) * normal
    }

    /// Largest absolute wave speed along each coordinate axis
    fn coordinate_wave_speeds(&self, state: &Solution) -> DVector<f64> {
        let dimension = self.space_dimension();
        DVector::from_iterator(
            dimension,
            (0..dimension).map(|axis| self.max_wave_speed(state, &unit_axis(dimension, axis))),
        )
    }

    /// `true` when the law has a single conserved quantity
    fn is_scalar(&self) -> bool {
        self.num_equations() == 1
    }
}

// =================================================================================================
// Tests
// =================================================================================================
