//! Time step methods
//!
//! # CFL time step
//!
//! For every cell the admissible step is bounded by the time a wave needs to
//! cross it. With `P_i[d]` the projected volume of cell `i` along axis `d`
//! (the larger of the face areas facing `+d` and `-d`, see
//! [`InnerFaces::projected_volumes`](crate::solver::InnerFaces::projected_volumes)):
//!
//! ```text
//! dt = min_i  cfl * V_i / Σ_d λ_d(u_i) P_i[d]
//! ```
//!
//! where `λ_d` is the maximum wave speed along axis `d`. On a uniform 1D
//! grid this reduces to the familiar `cfl * dx / |a|`, including cells with
//! an interior face on one side only.
//! Cells whose denominator is zero impose no constraint; if no cell imposes
//! one, the result is infinite and the caller rejects it.
//!
//! # Fixed time step
//!
//! Returns the configured value regardless of the solution.

use crate::error::{FvmError, FvmResult};
use crate::physics::Solution;
use crate::solver::{SemiDiscreteEquation, TimeStepMethod};
use tracing::warn;

// =================================================================================================
// CFL
// =================================================================================================

/// CFL-bounded time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CflTimeStep {
    cfl: f64,
}

impl CflTimeStep {
    /// Create a CFL time step
    ///
    /// # Errors
    ///
    /// [`FvmError::Configuration`] unless `cfl` is positive and finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fvm_rs::solver::CflTimeStep;
    ///
    /// assert!(CflTimeStep::new(0.8).is_ok());
    /// assert!(CflTimeStep::new(0.0).is_err());
    /// ```
    pub fn new(cfl: f64) -> FvmResult<Self> {
        if !(cfl.is_finite() && cfl > 0.0) {
            return Err(FvmError::config(format!("CFL number must be positive and finite, got {}", cfl)));
        }
        if cfl > 1.0 {
            warn!(cfl, "CFL number above 1, explicit schemes may be unstable");
        }
        Ok(Self { cfl })
    }

    /// CFL number
    pub fn cfl(&self) -> f64 {
        self.cfl
    }
}

impl TimeStepMethod for CflTimeStep {
    fn name(&self) -> &str {
        "CFL"
    }

    fn calculate_time_step(&self, semi_discrete_eq: &SemiDiscreteEquation, solutions: &[Solution]) -> f64 {
        let equation = semi_discrete_eq.equation();

        solutions
            .iter()
            .zip(semi_discrete_eq.cell_volumes())
            .zip(semi_discrete_eq.projected_volumes())
            .filter_map(|((solution, volume), projected)| {
                let speeds = equation.coordinate_wave_speeds(solution);
                let denominator = speeds.dot(projected);
                (denominator > 0.0).then(|| self.cfl * volume / denominator)
            })
            .fold(f64::INFINITY, f64::min)
    }
}

// =================================================================================================
// Fixed
// =================================================================================================

/// Constant time step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTimeStep {
    dt: f64,
}

impl FixedTimeStep {
    /// Create a fixed time step
    ///
    /// # Errors
    ///
    /// [`FvmError::Configuration`] unless `dt` is positive and finite.
    pub fn new(dt: f64) -> FvmResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FvmError::config(format!("fixed time step must be positive and finite, got {}", dt)));
        }
        Ok(Self { dt })
    }

    /// Step size
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

impl TimeStepMethod for FixedTimeStep {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn calculate_time_step(&self, _semi_discrete_eq: &SemiDiscreteEquation, _solutions: &[Solution]) -> f64 {
        self.dt
    }
}

// =================================================================================================
// Tests
// =================================================================================================
