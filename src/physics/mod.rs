//! Governing equations
//!
//! This module provides the trait every conservation law implements.
//! A governing equation encapsulates the physics of the system: the number of
//! conserved quantities, the physical flux and the wave speeds.
//!
//! # Architecture
//!
//! Governing equations are **separate from the discretization**:
//! - The equation provides the **physics** (flux, wave speeds)
//! - Numerical fluxes, reconstruction and time integrators provide the **method**
//!
//! This separation allows:
//! - Same equation with different numerical fluxes (upwind, Rusanov, ...)
//! - Same numerical flux with different equations (advection, Burgers, ...)
//!
//! # Implementing a New Governing Equation
//!
//! ```rust
//! use fvm_rs::physics::{GoverningEquation, Solution, SpaceVector};
//! use nalgebra::DMatrix;
//!
//! struct Transport1D;
//!
//! impl GoverningEquation for Transport1D {
//!     fn name(&self) -> &str { "Transport1D" }
//!     fn num_equations(&self) -> usize { 1 }
//!     fn space_dimension(&self) -> usize { 1 }
//!     fn physical_flux(&self, state: &Solution) -> DMatrix<f64> {
//!         DMatrix::from_element(1, 1, 0.5 * state[0])
//!     }
//!     fn characteristic_speed(&self, _state: &Solution, direction: &SpaceVector) -> Option<f64> {
//!         Some(0.5 * direction[0])
//!     }
//! }
//! ```
//!
//! # Available Equations
//!
//! See [`crate::models`]:
//! - **Linear advection**: `F(u) = a u`
//! - **Burgers**: `F(u) = ½u²` in every direction

pub mod traits;

pub use traits::{GoverningEquation, Solution, SpaceVector, unit_axis};
