//! fvm-rs: Finite Volume Kernel for Conservation Laws
//!
//! Cell-centered finite-volume discretization of hyperbolic conservation
//! laws `∂u/∂t + ∇·F(u) = 0` on unstructured grids, with explicit time
//! stepping to an exact end time.
//!
//! # Architecture
//!
//! fvm-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Governing equations define the physical flux and wave speeds (what to solve)
//!    - Numerical fluxes, reconstruction and time integrators provide methods (how to solve)
//!
//! 2. **Strategies chosen at configuration time**
//!    - Every plug point is a trait object
//!    - The face assembler stays one generic algorithm
//!
//! # Quick Start
//!
//! ```rust
//! use fvm_rs::prelude::*;
//! use nalgebra::DVector;
//!
//! # fn main() -> FvmResult<()> {
//! // 1. Grid: three unit cells on a line
//! let grid = Grid::uniform_line(3, 1.0)?;
//!
//! // 2. Semi-discrete equation: upwind advection at unit speed
//! let semi_discrete_eq = SemiDiscreteEquation::new(
//!     grid,
//!     Box::new(LinearAdvection::new(vec![1.0])),
//!     Box::new(Upwind),
//!     Box::new(ConstantReconstruction),
//! )?;
//!
//! // 3. Driver: CFL 1, Forward Euler, stop at t = 1
//! let mut driver = DiscreteEquation::new(
//!     Box::new(ForwardEuler),
//!     Box::new(CflTimeStep::new(1.0)?),
//!     Box::new(EndByTime::new(1.0)?),
//!     Box::new(PostNever),
//! );
//!
//! // 4. Run
//! let mut solutions = vec![
//!     DVector::from_vec(vec![1.0]),
//!     DVector::from_vec(vec![0.0]),
//!     DVector::from_vec(vec![0.0]),
//! ];
//! let mut recorder = SnapshotRecorder::new();
//! let summary = driver.solve(&semi_discrete_eq, &mut solutions, &mut recorder)?;
//!
//! assert_eq!(summary.final_time, 1.0);
//! assert_eq!(solutions[1][0], 1.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`mesh`]: Cell volumes and interior-face connectivity
//! - [`physics`]: Governing-equation trait
//! - [`models`]: Linear advection, Burgers
//! - [`numerics`]: Numerical fluxes and reconstruction
//! - [`solver`]: Face assembly, time step, integrators, driver, configuration
//! - [`output`]: Snapshot sinks (in-memory, CSV)
//! - [`error`]: Crate error type
//!
//! # Features
//!
//! - `parallel`: evaluate face fluxes with Rayon on large grids

pub mod error;
pub mod mesh;
pub mod models;
pub mod numerics;
pub mod output;
pub mod physics;
pub mod solver;

pub use error::{FvmError, FvmResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use fvm_rs::prelude::*;
    //! ```
    pub use crate::error::{FvmError, FvmResult};
    pub use crate::mesh::{Grid, InnerFaceConnectivity};
    pub use crate::models::{Burgers, LinearAdvection};
    pub use crate::numerics::{ConstantReconstruction, NumericalFlux, Reconstruction, Rusanov, Upwind};
    pub use crate::output::{SnapshotLabel, SnapshotRecorder, SnapshotSink};
    pub use crate::physics::{GoverningEquation, Solution};
    pub use crate::solver::{
        CflTimeStep, DiscreteEquation, EndByTime, FixedTimeStep, ForwardEuler, PostByTime, PostNever, Rk4,
        SemiDiscreteEquation, SimulationConfig, SolveEndCondition, SolvePostCondition, SolveSummary, SspRk3,
        TimeIntegralMethod, TimeStepMethod,
    };
}
