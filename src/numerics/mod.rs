//! Spatial discretization strategies
//!
//! - **`flux`**: numerical flux functions ([`Upwind`], [`Rusanov`])
//! - **`reconstruction`**: face-state reconstruction ([`ConstantReconstruction`])
//!
//! Both are selected at configuration time and injected into the
//! [`SemiDiscreteEquation`](crate::solver::SemiDiscreteEquation) as trait
//! objects, so the face assembler stays a single algorithm.

pub mod flux;
pub mod reconstruction;

pub use flux::{NumericalFlux, Rusanov, Upwind};
pub use reconstruction::{ConstantReconstruction, Reconstruction};
