//! Semi-discrete equation
//!
//! After spatial discretization the conservation law becomes a system of
//! ODEs, one per cell:
//!
//! ```text
//! du_i/dt = R_i(u) = -(1/V_i) Σ_f ± A_f F*(u_L, u_R, n_f)
//! ```
//!
//! [`SemiDiscreteEquation`] owns everything needed to evaluate `R(u)`: the
//! governing equation, the numerical flux, the reconstruction, the face
//! assembler and the cell volumes. It also evaluates the stability bound on
//! the time step through a pluggable [`TimeStepMethod`].

use crate::error::{FvmError, FvmResult};
use crate::mesh::Grid;
use crate::numerics::{NumericalFlux, Reconstruction};
use crate::physics::{GoverningEquation, Solution};
use crate::solver::inner_faces::{FluxScheme, InnerFaces};
use crate::solver::TimeStepMethod;
use nalgebra::DVector;
use tracing::debug;

/// Residual evaluation and time-step bound for one grid
pub struct SemiDiscreteEquation {
    equation: Box<dyn GoverningEquation>,
    flux: Box<dyn NumericalFlux>,
    reconstruction: Box<dyn Reconstruction>,
    inner_faces: InnerFaces,
    cell_volumes: Vec<f64>,
    projected_volumes: Vec<DVector<f64>>,
}

impl SemiDiscreteEquation {
    /// Assemble a semi-discrete equation, consuming `grid`
    ///
    /// # Errors
    ///
    /// - [`FvmError::Configuration`] if the equation's space dimension differs
    ///   from the grid's, or if the flux or reconstruction rejects the equation
    /// - [`FvmError::GridIntegrity`] if the connectivity is malformed
    pub fn new(
        grid: Grid,
        equation: Box<dyn GoverningEquation>,
        flux: Box<dyn NumericalFlux>,
        reconstruction: Box<dyn Reconstruction>,
    ) -> FvmResult<Self> {
        let space_dimension = grid.space_dimension();
        if equation.space_dimension() != space_dimension {
            return Err(FvmError::config(format!(
                "{} is {}-dimensional but the grid is {}-dimensional",
                equation.name(),
                equation.space_dimension(),
                space_dimension
            )));
        }
        if equation.num_equations() == 0 {
            return Err(FvmError::config(format!("{} has no conserved quantity", equation.name())));
        }

        flux.check_compatibility(equation.as_ref())?;
        reconstruction.check_compatibility(equation.as_ref())?;

        let (cell_volumes, connectivity) = grid.into_parts();
        let inner_faces = InnerFaces::new(connectivity, cell_volumes.len(), space_dimension)?;
        let projected_volumes = inner_faces.projected_volumes(space_dimension);

        debug!(
            equation = equation.name(),
            flux = flux.name(),
            reconstruction = reconstruction.name(),
            cells = cell_volumes.len(),
            faces = inner_faces.num_faces(),
            "semi-discrete equation assembled"
        );

        Ok(Self {
            equation,
            flux,
            reconstruction,
            inner_faces,
            cell_volumes,
            projected_volumes,
        })
    }

    /// Governing equation
    pub fn equation(&self) -> &dyn GoverningEquation {
        self.equation.as_ref()
    }

    /// Numerical flux
    pub fn flux(&self) -> &dyn NumericalFlux {
        self.flux.as_ref()
    }

    /// Reconstruction
    pub fn reconstruction(&self) -> &dyn Reconstruction {
        self.reconstruction.as_ref()
    }

    /// Face assembler
    pub fn inner_faces(&self) -> &InnerFaces {
        &self.inner_faces
    }

    /// Cell volumes
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Projected volume of every cell along every axis
    pub fn projected_volumes(&self) -> &[DVector<f64>] {
        &self.projected_volumes
    }

    /// Number of cells
    pub fn num_cells(&self) -> usize {
        self.cell_volumes.len()
    }

    /// Number of conserved quantities
    pub fn num_equations(&self) -> usize {
        self.equation.num_equations()
    }

    /// Zeroed residual array of the right shape
    pub fn zero_residuals(&self) -> Vec<DVector<f64>> {
        vec![DVector::zeros(self.num_equations()); self.num_cells()]
    }

    /// Check that `solutions` has one state of the right size per cell
    pub fn check_solutions(&self, solutions: &[Solution]) -> FvmResult<()> {
        if solutions.len() != self.num_cells() {
            return Err(FvmError::config(format!(
                "solution array has {} entries, grid has {} cells",
                solutions.len(),
                self.num_cells()
            )));
        }

        if let Some((cell, solution)) = solutions
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != self.num_equations())
        {
            return Err(FvmError::config(format!(
                "cell {} state has {} components, {} expects {}",
                cell,
                solution.len(),
                self.equation.name(),
                self.num_equations()
            )));
        }

        Ok(())
    }

    /// Evaluate `R(u)` into `rhs`
    ///
    /// `rhs` is zeroed, filled by the face assembler, then divided by the
    /// cell volumes. `solutions` is only read.
    pub fn calculate_rhs(&self, solutions: &[Solution], rhs: &mut [DVector<f64>]) {
        for residual in rhs.iter_mut() {
            residual.fill(0.0);
        }

        self.inner_faces.calculate_rhs(rhs, solutions, self.scheme());

        for (residual, volume) in rhs.iter_mut().zip(&self.cell_volumes) {
            *residual /= *volume;
        }
    }

    /// Evaluate `R(u)` into a freshly allocated array
    pub fn rhs(&self, solutions: &[Solution]) -> Vec<DVector<f64>> {
        let mut rhs = self.zero_residuals();
        self.calculate_rhs(solutions, &mut rhs);
        rhs
    }

    /// Stability-bounded time step for `solutions`
    ///
    /// # Errors
    ///
    /// [`FvmError::NumericalInstability`] if `method` returns a non-positive,
    /// NaN or infinite value.
    pub fn calculate_time_step(&self, solutions: &[Solution], method: &dyn TimeStepMethod) -> FvmResult<f64> {
        let dt = method.calculate_time_step(self, solutions);

        if !(dt.is_finite() && dt > 0.0) {
            return Err(FvmError::instability(format!(
                "{} time step produced dt = {}",
                method.name(),
                dt
            )));
        }

        Ok(dt)
    }

    fn scheme(&self) -> FluxScheme<'_> {
        FluxScheme {
            equation: self.equation.as_ref(),
            flux: self.flux.as_ref(),
            reconstruction: self.reconstruction.as_ref(),
        }
    }
}

impl std::fmt::Debug for SemiDiscreteEquation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemiDiscreteEquation")
            .field("equation", &self.equation.name())
            .field("flux", &self.flux.name())
            .field("reconstruction", &self.reconstruction.name())
            .field("cells", &self.num_cells())
            .field("faces", &self.inner_faces.num_faces())
            .finish()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
