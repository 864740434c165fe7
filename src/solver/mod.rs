//! Face assembly and time stepping
//!
//! This module turns a governing equation on a grid into a semi-discrete
//! system of ODEs and integrates it in time up to an exact end time.
//!
//! # Core Concepts
//!
//! ## The Layers
//!
//! 1. **Face assembler** (`InnerFaces`) - WHERE fluxes are exchanged
//!    - Owns the interior-face normals, areas and owner/neighbor pairs
//!    - Scatters one flux per face, with opposite signs, into the residual
//!
//! 2. **Semi-discrete equation** (`SemiDiscreteEquation`) - WHAT is integrated
//!    - Governing equation + numerical flux + reconstruction
//!    - Residual evaluation and stability-bounded time step
//!
//! 3. **Driver** (`DiscreteEquation`) - HOW it is integrated
//!    - Time step method, time integral method
//!    - End and post conditions, snapshot emission
//!
//! # Module Organization
//!
//! - **`traits`**: strategy contracts (`TimeStepMethod`, `TimeIntegralMethod`,
//!   `SolveEndCondition`, `SolvePostCondition`)
//! - **`inner_faces`**: conservative face assembly
//! - **`semi_discrete`**: residual and time step
//! - **`time_step`**: CFL and fixed time steps
//! - **`methods`**: Forward Euler, SSP-RK3, RK4
//! - **`condition`**: end/post conditions
//! - **`driver`**: the time-stepping state machine
//! - **`config`**: serde configuration and strategy factories
//!
//! # Quick Start Example
//!
//! ```rust
//! use fvm_rs::mesh::Grid;
//! use fvm_rs::output::SnapshotRecorder;
//! use fvm_rs::solver::SimulationConfig;
//! use nalgebra::DVector;
//!
//! # fn main() -> fvm_rs::FvmResult<()> {
//! let config = SimulationConfig {
//!     end_time: 2.0,
//!     post_interval: Some(0.5),
//!     ..SimulationConfig::default()
//! };
//!
//! let grid = Grid::uniform_line(20, 0.1)?;
//! let semi_discrete_eq = config.build_semi_discrete_equation(grid)?;
//! let mut driver = config.build_driver()?;
//!
//! let mut solutions = vec![DVector::from_vec(vec![0.0]); 20];
//! solutions[0][0] = 1.0;
//!
//! let mut recorder = SnapshotRecorder::default();
//! let summary = driver.solve(&semi_discrete_eq, &mut solutions, &mut recorder)?;
//! assert_eq!(summary.final_time, 2.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every fallible call returns [`FvmResult`](crate::FvmResult). Errors are
//! fatal for the run:
//! - invalid configuration or strategy combination (`Configuration`)
//! - malformed connectivity (`GridIntegrity`)
//! - bad time step or non-finite values (`NumericalInstability`)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod inner_faces;
mod semi_discrete;
mod time_step;
mod condition;
mod driver;
mod config;
mod methods;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand face-flux evaluation to Rayon is an execution
// concern of the solver, not of the numerical fluxes. The threshold lives in
// an AtomicUsize so tests and benchmarks can change it at runtime without a
// mutex on every residual evaluation. Relaxed ordering is enough: the value
// is a performance hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of faces above which face fluxes are evaluated in parallel.
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Face assembly evaluates fluxes sequentially when the grid has at most this
/// many interior faces, and with Rayon above it, but only when the crate is
/// compiled with the `parallel` feature. Both paths produce bit-identical
/// residuals.
///
/// # Example
///
/// ```rust
/// use fvm_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use fvm_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Test builds only.
///
/// Guards serialize on a shared lock, so tests that change the threshold do
/// not observe each other's values.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        // a panicking test only poisons the lock, the threshold is restored by drop
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SolveEndCondition, SolvePostCondition, TimeIntegralMethod, TimeStepMethod};

pub use condition::{EndByTime, PostByTime, PostNever};
pub use config::{
    EquationConfig, FluxKind, IntegratorKind, ReconstructionKind, SimulationConfig, TimeStepConfig,
};
pub use driver::{DiscreteEquation, DriverState, SolveSummary};
pub use inner_faces::{FluxScheme, InnerFaces};
pub use methods::{ForwardEuler, Rk4, SspRk3};
pub use semi_discrete::SemiDiscreteEquation;
pub use time_step::{CflTimeStep, FixedTimeStep};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{FvmError, FvmResult};
use crate::physics::Solution;

/// Check that every solution value is finite
///
/// NaN comes from 0/0 or Inf - Inf; Inf from overflow. Either one means the
/// run is meaningless from here on.
pub(crate) fn validate_solutions(solutions: &[Solution]) -> FvmResult<()> {
    for (cell, solution) in solutions.iter().enumerate() {
        if solution.iter().any(|x| x.is_nan()) {
            return Err(FvmError::instability(format!(
                "NaN detected in cell {}. Try reducing the CFL number.",
                cell
            )));
        }

        if solution.iter().any(|x| x.is_infinite()) {
            return Err(FvmError::instability(format!(
                "Infinity detected in cell {}. Try reducing the CFL number.",
                cell
            )));
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
