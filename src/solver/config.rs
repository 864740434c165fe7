//! Simulation configuration
//!
//! [`SimulationConfig`] names every strategy of a run (governing equation,
//! numerical flux, reconstruction, time step method, time integral method,
//! end and post conditions) as plain serde data, and builds the trait
//! objects from it.
//!
//! # JSON
//!
//! ```json
//! {
//!   "equation": { "type": "linear_advection", "velocity": [1.0, 0.5] },
//!   "flux": "rusanov",
//!   "reconstruction": "constant",
//!   "time_step": { "type": "cfl", "cfl": 0.8 },
//!   "integrator": "ssp_rk3",
//!   "end_time": 2.0,
//!   "post_interval": 0.25
//! }
//! ```
//!
//! Missing fields take their [`Default`] value. Unsupported combinations
//! (e.g. `upwind` on a system) surface as
//! [`FvmError::Configuration`] when the semi-discrete equation is built.

use crate::error::{FvmError, FvmResult};
use crate::mesh::Grid;
use crate::models::{Burgers, LinearAdvection};
use crate::numerics::{ConstantReconstruction, NumericalFlux, Reconstruction, Rusanov, Upwind};
use crate::physics::GoverningEquation;
use crate::solver::{
    CflTimeStep, DiscreteEquation, EndByTime, FixedTimeStep, ForwardEuler, PostByTime, PostNever, Rk4,
    SemiDiscreteEquation, SolveEndCondition, SolvePostCondition, SspRk3, TimeIntegralMethod, TimeStepMethod,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// =================================================================================================
// Strategy selectors
// =================================================================================================

/// Governing equation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EquationConfig {
    /// `∂u/∂t + ∇·(a u) = 0`
    LinearAdvection { velocity: Vec<f64> },
    /// `∂u/∂t + ∇·(½u² 1) = 0`
    Burgers { dimension: usize },
}

/// Numerical flux
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluxKind {
    Upwind,
    Rusanov,
}

/// Face-state reconstruction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconstructionKind {
    #[default]
    Constant,
}

/// Time step method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeStepConfig {
    Cfl { cfl: f64 },
    Fixed { dt: f64 },
}

/// Time integral method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    ForwardEuler,
    SspRk3,
    Rk4,
}

// =================================================================================================
// Simulation configuration
// =================================================================================================

/// Configuration of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub equation: EquationConfig,
    pub flux: FluxKind,
    pub reconstruction: ReconstructionKind,
    pub time_step: TimeStepConfig,
    pub integrator: IntegratorKind,

    /// Simulated time at which the run stops
    pub end_time: f64,

    /// Interval between intermediate snapshots, none if absent
    pub post_interval: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            equation: EquationConfig::LinearAdvection { velocity: vec![1.0] },
            flux: FluxKind::Upwind,
            reconstruction: ReconstructionKind::Constant,
            time_step: TimeStepConfig::Cfl { cfl: 0.9 },
            integrator: IntegratorKind::ForwardEuler,
            end_time: 1.0,
            post_interval: None,
        }
    }
}

impl SimulationConfig {
    /// Parse and validate a JSON configuration
    ///
    /// # Errors
    ///
    /// [`FvmError::Parse`] on malformed JSON, [`FvmError::Configuration`] on
    /// invalid values.
    pub fn from_json_str(text: &str) -> FvmResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> FvmResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON
    pub fn to_json_string(&self) -> FvmResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter without building anything
    pub fn validate(&self) -> FvmResult<()> {
        match &self.equation {
            EquationConfig::LinearAdvection { velocity } => {
                if velocity.is_empty() {
                    return Err(FvmError::config("advection velocity must have at least one component"));
                }
                if velocity.iter().any(|v| !v.is_finite()) {
                    return Err(FvmError::config(format!("advection velocity must be finite, got {:?}", velocity)));
                }
            }
            EquationConfig::Burgers { dimension } => {
                if *dimension == 0 {
                    return Err(FvmError::config("Burgers dimension must be at least 1"));
                }
            }
        }

        match self.time_step {
            TimeStepConfig::Cfl { cfl } => CflTimeStep::new(cfl).map(|_| ())?,
            TimeStepConfig::Fixed { dt } => FixedTimeStep::new(dt).map(|_| ())?,
        }

        EndByTime::new(self.end_time)?;
        if let Some(interval) = self.post_interval {
            PostByTime::new(interval)?;
        }

        Ok(())
    }

    /// Build the governing equation
    ///
    /// Validates the whole configuration first.
    pub fn build_equation(&self) -> FvmResult<Box<dyn GoverningEquation>> {
        self.validate()?;
        let equation: Box<dyn GoverningEquation> = match &self.equation {
            EquationConfig::LinearAdvection { velocity } => Box::new(LinearAdvection::new(velocity.clone())),
            EquationConfig::Burgers { dimension } => Box::new(Burgers::new(*dimension)),
        };
        Ok(equation)
    }

    /// Numerical flux for every face
    pub fn build_flux(&self) -> Box<dyn NumericalFlux> {
        match self.flux {
            FluxKind::Upwind => Box::new(Upwind),
            FluxKind::Rusanov => Box::new(Rusanov),
        }
    }

    /// Face-state reconstruction
    pub fn build_reconstruction(&self) -> Box<dyn Reconstruction> {
        match self.reconstruction {
            ReconstructionKind::Constant => Box::new(ConstantReconstruction),
        }
    }

    /// CFL or fixed time step
    pub fn build_time_step_method(&self) -> FvmResult<Box<dyn TimeStepMethod>> {
        let method: Box<dyn TimeStepMethod> = match self.time_step {
            TimeStepConfig::Cfl { cfl } => Box::new(CflTimeStep::new(cfl)?),
            TimeStepConfig::Fixed { dt } => Box::new(FixedTimeStep::new(dt)?),
        };
        Ok(method)
    }

    /// Explicit integrator
    pub fn build_time_integral_method(&self) -> Box<dyn TimeIntegralMethod> {
        match self.integrator {
            IntegratorKind::ForwardEuler => Box::new(ForwardEuler),
            IntegratorKind::SspRk3 => Box::new(SspRk3),
            IntegratorKind::Rk4 => Box::new(Rk4),
        }
    }

    /// Stop at `end_time`
    pub fn build_end_condition(&self) -> FvmResult<Box<dyn SolveEndCondition>> {
        Ok(Box::new(EndByTime::new(self.end_time)?))
    }

    /// Snapshot every `post_interval`, or never when it is unset
    pub fn build_post_condition(&self) -> FvmResult<Box<dyn SolvePostCondition>> {
        let condition: Box<dyn SolvePostCondition> = match self.post_interval {
            Some(interval) => Box::new(PostByTime::new(interval)?),
            None => Box::new(PostNever),
        };
        Ok(condition)
    }

    /// Build the semi-discrete equation on `grid`, consuming it
    pub fn build_semi_discrete_equation(&self, grid: Grid) -> FvmResult<SemiDiscreteEquation> {
        SemiDiscreteEquation::new(grid, self.build_equation()?, self.build_flux(), self.build_reconstruction())
    }

    /// Build the time-stepping driver
    pub fn build_driver(&self) -> FvmResult<DiscreteEquation> {
        Ok(DiscreteEquation::new(
            self.build_time_integral_method(),
            self.build_time_step_method()?,
            self.build_end_condition()?,
            self.build_post_condition()?,
        ))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
