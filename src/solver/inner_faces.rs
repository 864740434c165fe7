//! Conservative interior-face assembly
//!
//! # Algorithm
//!
//! For every interior face `f = (owner, neighbor)`, in face-index order:
//!
//! ```text
//! (u_L, u_R) = reconstruct(f)
//! F*         = numerical_flux(u_L, u_R, n_f)
//! RHS[owner]    -= A_f · F*
//! RHS[neighbor] += A_f · F*
//! ```
//!
//! Only one flux value is computed per face and it is added and subtracted
//! as the same `DVector`, so the two contributions are exact negatives of
//! each other and the sum of all contributions over the grid is zero up to
//! the rounding of the accumulation.
//!
//! # Parallel evaluation
//!
//! With the `parallel` feature and more faces than
//! [`parallel_threshold`](crate::solver::parallel_threshold), the face fluxes
//! are evaluated with Rayon into a per-face buffer first. The scatter into
//! `RHS` always runs serially in face order: two faces sharing a cell never
//! write concurrently, and the result is bit-identical to the sequential path.

use crate::error::{FvmError, FvmResult};
use crate::mesh::{Grid, InnerFaceConnectivity};
use crate::numerics::{NumericalFlux, Reconstruction};
use crate::physics::{GoverningEquation, Solution, SpaceVector};
use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Borrowed strategy bundle used for one residual evaluation
#[derive(Clone, Copy)]
pub struct FluxScheme<'a> {
    /// Physics
    pub equation: &'a dyn GoverningEquation,
    /// Face flux
    pub flux: &'a dyn NumericalFlux,
    /// Face states
    pub reconstruction: &'a dyn Reconstruction,
}

/// Face assembler: sole owner of the interior-face arrays
#[derive(Debug, Clone)]
pub struct InnerFaces {
    num_cells: usize,
    normals: Vec<SpaceVector>,
    oc_nc_index_pairs: Vec<(usize, usize)>,
    areas: Vec<f64>,
}

impl InnerFaces {
    /// Take ownership of `connectivity` for a grid of `num_cells` cells
    ///
    /// # Errors
    ///
    /// [`FvmError::GridIntegrity`] if any face is malformed (see
    /// [`InnerFaceConnectivity::validate`]). This is the only place indices
    /// are checked; residual evaluation trusts them.
    pub fn new(
        connectivity: InnerFaceConnectivity,
        num_cells: usize,
        space_dimension: usize,
    ) -> FvmResult<Self> {
        connectivity.validate(num_cells, space_dimension)?;

        let InnerFaceConnectivity {
            normals,
            oc_nc_index_pairs,
            areas,
        } = connectivity;

        Ok(Self {
            num_cells,
            normals,
            oc_nc_index_pairs,
            areas,
        })
    }

    /// Move the faces out of `grid`, which is left without faces
    pub fn from_grid(grid: &mut Grid) -> FvmResult<Self> {
        let connectivity = grid.take_inner_faces();
        Self::new(connectivity, grid.num_cells(), grid.space_dimension())
    }

    /// Number of interior faces
    pub fn num_faces(&self) -> usize {
        self.oc_nc_index_pairs.len()
    }

    /// Number of cells the face indices refer to
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Face unit normals (owner → neighbor)
    pub fn normals(&self) -> &[SpaceVector] {
        &self.normals
    }

    /// `(owner, neighbor)` pairs
    pub fn oc_nc_index_pairs(&self) -> &[(usize, usize)] {
        &self.oc_nc_index_pairs
    }

    /// Face areas
    pub fn areas(&self) -> &[f64] {
        &self.areas
    }

    /// Numerical flux of every face, in face order
    pub fn numerical_fluxes(&self, solutions: &[Solution], scheme: FluxScheme<'_>) -> Vec<DVector<f64>> {
        #[cfg(feature = "parallel")]
        if self.num_faces() > crate::solver::parallel_threshold() {
            return (0..self.num_faces())
                .into_par_iter()
                .map(|face| self.face_flux(face, solutions, scheme))
                .collect();
        }

        (0..self.num_faces())
            .map(|face| self.face_flux(face, solutions, scheme))
            .collect()
    }

    /// Accumulate every face contribution into `rhs`
    ///
    /// `rhs` is not zeroed here; [`SemiDiscreteEquation::calculate_rhs`](crate::solver::SemiDiscreteEquation::calculate_rhs)
    /// does that before calling.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` or `solutions` does not have one entry per cell.
    pub fn calculate_rhs(&self, rhs: &mut [DVector<f64>], solutions: &[Solution], scheme: FluxScheme<'_>) {
        assert_eq!(solutions.len(), self.num_cells, "solution array must have one entry per cell");
        assert_eq!(rhs.len(), self.num_cells, "residual array must have one entry per cell");

        #[cfg(feature = "parallel")]
        if self.num_faces() > crate::solver::parallel_threshold() {
            let fluxes = self.numerical_fluxes(solutions, scheme);
            for (face, flux) in fluxes.into_iter().enumerate() {
                self.scatter(rhs, face, flux);
            }
            return;
        }

        for face in 0..self.num_faces() {
            let flux = self.face_flux(face, solutions, scheme);
            self.scatter(rhs, face, flux);
        }
    }

    /// Projected volume of every cell along every coordinate axis
    ///
    /// Per axis `d`, the areas `|n_f,d| A_f` are summed separately for the
    /// faces of cell `i` whose outward normal points along `+d` and along
    /// `-d`, and `P[i][d]` is the larger sum. For a closed cell both sums
    /// match and this is `½ Σ |n_f,d| A_f`; for a cell with interior faces on
    /// one side only, the missing side does not halve the projection.
    pub fn projected_volumes(&self, space_dimension: usize) -> Vec<DVector<f64>> {
        let mut positive = vec![DVector::<f64>::zeros(space_dimension); self.num_cells];
        let mut negative = vec![DVector::<f64>::zeros(space_dimension); self.num_cells];

        for (face, &(owner, neighbor)) in self.oc_nc_index_pairs.iter().enumerate() {
            let area = self.areas[face];
            for (d, &component) in self.normals[face].iter().enumerate() {
                let projected_area = component.abs() * area;
                // the normal points out of the owner and into the neighbor
                if component > 0.0 {
                    positive[owner][d] += projected_area;
                    negative[neighbor][d] += projected_area;
                } else if component < 0.0 {
                    negative[owner][d] += projected_area;
                    positive[neighbor][d] += projected_area;
                }
            }
        }

        positive
            .into_iter()
            .zip(negative)
            .map(|(plus, minus)| plus.zip_map(&minus, f64::max))
            .collect()
    }

    fn face_flux(&self, face: usize, solutions: &[Solution], scheme: FluxScheme<'_>) -> DVector<f64> {
        let (owner, neighbor) = self.oc_nc_index_pairs[face];
        let (left, right) = scheme.reconstruction.reconstruct(solutions, face, owner, neighbor);
        scheme.flux.calculate(scheme.equation, &left, &right, &self.normals[face])
    }

    fn scatter(&self, rhs: &mut [DVector<f64>], face: usize, flux: DVector<f64>) {
        let (owner, neighbor) = self.oc_nc_index_pairs[face];
        let delta_rhs = flux * self.areas[face];
        rhs[owner] -= &delta_rhs;
        rhs[neighbor] += &delta_rhs;
    }
}

impl TryFrom<&mut Grid> for InnerFaces {
    type Error = FvmError;

    fn try_from(grid: &mut Grid) -> FvmResult<Self> {
        Self::from_grid(grid)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Burgers, LinearAdvection};
    use crate::numerics::{ConstantReconstruction, Rusanov, Upwind};
    use approx::assert_relative_eq;

    fn scalar_solutions(values: &[f64]) -> Vec<Solution> {
        values.iter().map(|&v| DVector::from_vec(vec![v])).collect()
    }

    fn zero_rhs(num_cells: usize) -> Vec<DVector<f64>> {
        vec![DVector::zeros(1); num_cells]
    }

    #[test]
    fn test_from_grid_moves_faces() {
        let mut grid = Grid::uniform_line(3, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();

        assert_eq!(faces.num_faces(), 2);
        assert_eq!(faces.num_cells(), 3);
        assert!(grid.inner_faces().is_empty());
    }

    #[test]
    fn test_dangling_index_rejected_at_construction() {
        let connectivity =
            InnerFaceConnectivity::new(vec![DVector::from_vec(vec![1.0])], vec![(0, 5)], vec![1.0]);
        let error = InnerFaces::new(connectivity, 3, 1).unwrap_err();
        assert!(matches!(error, FvmError::GridIntegrity { .. }));
    }

    #[test]
    fn test_three_cell_upwind_residual() {
        let mut grid = Grid::uniform_line(3, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = LinearAdvection::new(vec![1.0]);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Upwind,
            reconstruction: &ConstantReconstruction,
        };

        let solutions = scalar_solutions(&[1.0, 0.0, 0.0]);
        let mut rhs = zero_rhs(3);
        faces.calculate_rhs(&mut rhs, &solutions, scheme);

        assert_eq!(rhs[0][0], -1.0);
        assert_eq!(rhs[1][0], 1.0);
        assert_eq!(rhs[2][0], 0.0);
    }

    #[test]
    fn test_residual_accumulates_into_existing_values() {
        let mut grid = Grid::uniform_line(2, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = LinearAdvection::new(vec![2.0]);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Upwind,
            reconstruction: &ConstantReconstruction,
        };

        let mut rhs = vec![DVector::from_vec(vec![10.0]), DVector::from_vec(vec![10.0])];
        faces.calculate_rhs(&mut rhs, &scalar_solutions(&[1.0, 0.0]), scheme);

        assert_eq!(rhs[0][0], 8.0);
        assert_eq!(rhs[1][0], 12.0);
    }

    #[test]
    fn test_conservation_on_structured_rectangle() {
        let mut grid = Grid::structured_rectangle(7, 5, 1.0, 2.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = Burgers::new(2);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Rusanov,
            reconstruction: &ConstantReconstruction,
        };

        let values: Vec<f64> = (0..35).map(|i| ((i * 37 % 11) as f64 - 5.0) * 0.731).collect();
        let solutions = scalar_solutions(&values);
        let mut rhs = zero_rhs(35);
        faces.calculate_rhs(&mut rhs, &solutions, scheme);

        let total: f64 = rhs.iter().map(|r| r[0]).sum();
        let scale: f64 = rhs.iter().map(|r| r[0].abs()).sum();
        assert!(scale > 0.0);
        assert!(total.abs() <= 1e-13 * scale, "net residual {} not zero", total);
    }

    #[test]
    fn test_face_contributions_are_exact_negatives() {
        // One face in isolation: owner and neighbor must receive -v and +v bit for bit
        let connectivity = InnerFaceConnectivity::new(
            vec![DVector::from_vec(vec![0.6, 0.8])],
            vec![(1, 0)],
            vec![0.37],
        );
        let faces = InnerFaces::new(connectivity, 2, 2).unwrap();
        let equation = LinearAdvection::new(vec![0.3, -1.7]);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Rusanov,
            reconstruction: &ConstantReconstruction,
        };

        let mut rhs = zero_rhs(2);
        faces.calculate_rhs(&mut rhs, &scalar_solutions(&[0.123, 4.56]), scheme);

        assert_eq!(rhs[0][0], -rhs[1][0]);
        assert_ne!(rhs[0][0], 0.0);
    }

    #[test]
    fn test_numerical_fluxes_match_assembly() {
        let mut grid = Grid::uniform_line(4, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = Burgers::new(1);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Rusanov,
            reconstruction: &ConstantReconstruction,
        };
        let solutions = scalar_solutions(&[2.0, 1.0, -1.0, 0.5]);

        let fluxes = faces.numerical_fluxes(&solutions, scheme);
        assert_eq!(fluxes.len(), 3);

        let mut rhs = zero_rhs(4);
        faces.calculate_rhs(&mut rhs, &solutions, scheme);
        assert_relative_eq!(rhs[0][0], -fluxes[0][0]);
        assert_relative_eq!(rhs[3][0], fluxes[2][0]);
    }

    #[test]
    fn test_low_threshold_matches_face_by_face_scatter() {
        // every grid is above a threshold of 1, so the parallel path runs
        // when the feature is enabled
        let _guard = crate::solver::ThresholdGuard::save(1);
        let mut grid = Grid::structured_rectangle(50, 50, 1.0, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = LinearAdvection::new(vec![1.0, -0.5]);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Upwind,
            reconstruction: &ConstantReconstruction,
        };
        let values: Vec<f64> = (0..2500).map(|i| (i as f64 * 0.37).sin()).collect();
        let solutions = scalar_solutions(&values);

        let mut assembled = zero_rhs(2500);
        faces.calculate_rhs(&mut assembled, &solutions, scheme);

        let mut reference = zero_rhs(2500);
        for face in 0..faces.num_faces() {
            let flux = faces.face_flux(face, &solutions, scheme);
            faces.scatter(&mut reference, face, flux);
        }

        assert_eq!(assembled, reference);
    }

    #[test]
    fn test_projected_volumes_uniform_line() {
        let mut grid = Grid::uniform_line(3, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let projected = faces.projected_volumes(1);

        assert_eq!(projected[0][0], 1.0);
        assert_eq!(projected[1][0], 1.0);
        assert_eq!(projected[2][0], 1.0);
    }

    #[test]
    fn test_projected_volumes_one_sided_cells() {
        // 2x2 cells of 0.5 x 0.25: every cell has one interior face per axis
        let mut grid = Grid::structured_rectangle(2, 2, 1.0, 0.5).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let projected = faces.projected_volumes(2);

        for cell_projection in &projected {
            assert_relative_eq!(cell_projection[0], 0.25);
            assert_relative_eq!(cell_projection[1], 0.5);
        }
    }

    #[test]
    fn test_projected_volumes_oblique_normal() {
        let connectivity = InnerFaceConnectivity::new(
            vec![DVector::from_vec(vec![0.6, -0.8])],
            vec![(0, 1)],
            vec![2.0],
        );
        let faces = InnerFaces::new(connectivity, 2, 2).unwrap();
        let projected = faces.projected_volumes(2);

        assert_relative_eq!(projected[0][0], 1.2);
        assert_relative_eq!(projected[0][1], 1.6);
        assert_relative_eq!(projected[1][0], 1.2);
        assert_relative_eq!(projected[1][1], 1.6);
    }

    #[test]
    #[should_panic(expected = "one entry per cell")]
    fn test_wrong_solution_length_panics() {
        let mut grid = Grid::uniform_line(3, 1.0).unwrap();
        let faces = InnerFaces::from_grid(&mut grid).unwrap();
        let equation = LinearAdvection::new(vec![1.0]);
        let scheme = FluxScheme {
            equation: &equation,
            flux: &Upwind,
            reconstruction: &ConstantReconstruction,
        };
        let mut rhs = zero_rhs(3);
        faces.calculate_rhs(&mut rhs, &scalar_solutions(&[1.0, 2.0]), scheme);
    }
}
