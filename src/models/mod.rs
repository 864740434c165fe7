//! Conservation laws shipped with the kernel
//!
//! All models implement the [`GoverningEquation`](crate::physics::GoverningEquation) trait.
//! Models only describe the physics (flux, wave speeds); face assembly and
//! time integration live in [`crate::solver`].
//!
//! # Available Models
//!
//! ## [`LinearAdvection`]
//!
//! Scalar transport at a constant velocity. The upwind scheme is exact in
//! the sense of the hand-computable one-step results used throughout the
//! test suite.
//!
//! ## [`Burgers`]
//!
//! Nonlinear scalar law `F(u) = ½u²` in every direction.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod burgers;
pub mod linear_advection;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use burgers::Burgers;
pub use linear_advection::LinearAdvection;
