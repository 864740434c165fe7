//! Cell volumes and interior-face connectivity
//!
//! The kernel does not build meshes from files: it consumes precomputed cell
//! volumes and, per interior face, an owner/neighbor pair, a unit normal
//! oriented from owner to neighbor and an area. This module holds that data,
//! validates it once, and hands the face arrays over to the face assembler.
//!
//! Two builders produce interior-face-only meshes for tests and demos:
//! [`Grid::uniform_line`] and [`Grid::structured_rectangle`].

use crate::error::{FvmError, FvmResult};
use crate::physics::SpaceVector;
use nalgebra::DVector;

/// Largest accepted deviation of a face normal's Euclidean norm from 1
pub const NORMAL_TOLERANCE: f64 = 1e-10;

// =================================================================================================
// Interior face connectivity
// =================================================================================================

/// Interior faces stored as three parallel sequences
///
/// Entry `i` of each sequence describes face `i`. Normals point from the
/// owner cell to the neighbor cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InnerFaceConnectivity {
    /// Unit normals, oriented owner → neighbor
    pub normals: Vec<SpaceVector>,

    /// `(owner, neighbor)` cell indices
    pub oc_nc_index_pairs: Vec<(usize, usize)>,

    /// Face areas (lengths in 2D, 1 in 1D)
    pub areas: Vec<f64>,
}

impl InnerFaceConnectivity {
    /// Bundle the three face sequences (validated later, against a cell count)
    pub fn new(
        normals: Vec<SpaceVector>,
        oc_nc_index_pairs: Vec<(usize, usize)>,
        areas: Vec<f64>,
    ) -> Self {
        Self {
            normals,
            oc_nc_index_pairs,
            areas,
        }
    }

    /// Number of faces
    pub fn len(&self) -> usize {
        self.oc_nc_index_pairs.len()
    }

    /// `true` when there is no face
    pub fn is_empty(&self) -> bool {
        self.oc_nc_index_pairs.is_empty()
    }

    /// Check every face against `num_cells` cells in `space_dimension` dimensions
    ///
    /// # Errors
    ///
    /// [`FvmError::GridIntegrity`] on the first offending face:
    /// - sequences of different lengths
    /// - owner or neighbor out of `0..num_cells`
    /// - owner equal to neighbor
    /// - normal of the wrong dimension, non-finite or not of unit length
    /// - area non-positive or non-finite
    pub fn validate(&self, num_cells: usize, space_dimension: usize) -> FvmResult<()> {
        let num_faces = self.oc_nc_index_pairs.len();
        if self.normals.len() != num_faces || self.areas.len() != num_faces {
            return Err(FvmError::grid(format!(
                "face sequences differ in length: {} index pairs, {} normals, {} areas",
                num_faces,
                self.normals.len(),
                self.areas.len()
            )));
        }

        for (face, &(owner, neighbor)) in self.oc_nc_index_pairs.iter().enumerate() {
            if owner >= num_cells || neighbor >= num_cells {
                return Err(FvmError::grid(format!(
                    "face {} references cells ({}, {}) but the grid has {} cells",
                    face, owner, neighbor, num_cells
                )));
            }
            if owner == neighbor {
                return Err(FvmError::grid(format!(
                    "face {} has the same owner and neighbor cell {}",
                    face, owner
                )));
            }

            let normal = &self.normals[face];
            if normal.len() != space_dimension {
                return Err(FvmError::grid(format!(
                    "face {} normal has dimension {}, expected {}",
                    face,
                    normal.len(),
                    space_dimension
                )));
            }
            let norm = normal.norm();
            if !norm.is_finite() || (norm - 1.0).abs() > NORMAL_TOLERANCE {
                return Err(FvmError::grid(format!(
                    "face {} normal is not a unit vector (norm {})",
                    face, norm
                )));
            }

            let area = self.areas[face];
            if !(area.is_finite() && area > 0.0) {
                return Err(FvmError::grid(format!(
                    "face {} area must be positive and finite, got {}",
                    face, area
                )));
            }
        }

        Ok(())
    }
}

// =================================================================================================
// Grid
// =================================================================================================

/// Cell volumes plus interior-face connectivity
///
/// # Example
///
/// ```rust
/// use fvm_rs::mesh::{Grid, InnerFaceConnectivity};
/// use nalgebra::DVector;
///
/// let faces = InnerFaceConnectivity::new(
///     vec![DVector::from_vec(vec![1.0])],
///     vec![(0, 1)],
///     vec![1.0],
/// );
/// let mut grid = Grid::new(1, vec![1.0, 1.0], faces).unwrap();
///
/// let taken = grid.take_inner_faces();
/// assert_eq!(taken.len(), 1);
/// assert!(grid.inner_faces().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    space_dimension: usize,
    cell_volumes: Vec<f64>,
    inner_faces: InnerFaceConnectivity,
}

impl Grid {
    /// Validate and assemble a grid
    ///
    /// # Errors
    ///
    /// [`FvmError::GridIntegrity`] for a zero dimension, a non-positive or
    /// non-finite cell volume, or any face rejected by
    /// [`InnerFaceConnectivity::validate`].
    pub fn new(
        space_dimension: usize,
        cell_volumes: Vec<f64>,
        inner_faces: InnerFaceConnectivity,
    ) -> FvmResult<Self> {
        if space_dimension == 0 {
            return Err(FvmError::grid("space dimension must be at least 1"));
        }

        if let Some((cell, volume)) = cell_volumes
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(FvmError::grid(format!(
                "cell {} volume must be positive and finite, got {}",
                cell, volume
            )));
        }

        inner_faces.validate(cell_volumes.len(), space_dimension)?;

        Ok(Self {
            space_dimension,
            cell_volumes,
            inner_faces,
        })
    }

    /// `num_cells` cells of width `dx` on a line, faces between consecutive cells
    ///
    /// Face `i` joins cell `i` (owner) to cell `i + 1` (neighbor) with normal
    /// `+x` and unit area.
    pub fn uniform_line(num_cells: usize, dx: f64) -> FvmResult<Self> {
        let num_faces = num_cells.saturating_sub(1);

        let faces = InnerFaceConnectivity::new(
            vec![DVector::from_vec(vec![1.0]); num_faces],
            (0..num_faces).map(|i| (i, i + 1)).collect(),
            vec![1.0; num_faces],
        );

        Self::new(1, vec![dx; num_cells], faces)
    }

    /// `nx × ny` rectangular cells covering `[0, lx] × [0, ly]`
    ///
    /// Cell `(i, j)` has index `i + j * nx`. Faces normal to `x` come first
    /// (row by row), then faces normal to `y`.
    pub fn structured_rectangle(nx: usize, ny: usize, lx: f64, ly: f64) -> FvmResult<Self> {
        if nx == 0 || ny == 0 {
            return Err(FvmError::grid(format!(
                "structured rectangle needs at least one cell per direction, got {} × {}",
                nx, ny
            )));
        }

        let dx = lx / nx as f64;
        let dy = ly / ny as f64;
        let index = |i: usize, j: usize| i + j * nx;

        let num_faces = (nx - 1) * ny + nx * (ny - 1);
        let mut faces = InnerFaceConnectivity {
            normals: Vec::with_capacity(num_faces),
            oc_nc_index_pairs: Vec::with_capacity(num_faces),
            areas: Vec::with_capacity(num_faces),
        };

        for j in 0..ny {
            for i in 0..nx - 1 {
                faces.normals.push(DVector::from_vec(vec![1.0, 0.0]));
                faces.oc_nc_index_pairs.push((index(i, j), index(i + 1, j)));
                faces.areas.push(dy);
            }
        }
        for j in 0..ny - 1 {
            for i in 0..nx {
                faces.normals.push(DVector::from_vec(vec![0.0, 1.0]));
                faces.oc_nc_index_pairs.push((index(i, j), index(i, j + 1)));
                faces.areas.push(dx);
            }
        }

        Self::new(2, vec![dx * dy; nx * ny], faces)
    }

    /// Number of spatial dimensions
    pub fn space_dimension(&self) -> usize {
        self.space_dimension
    }

    /// Number of cells
    pub fn num_cells(&self) -> usize {
        self.cell_volumes.len()
    }

    /// Cell volumes (areas in 2D, widths in 1D)
    pub fn cell_volumes(&self) -> &[f64] {
        &self.cell_volumes
    }

    /// Interior faces still held by the grid
    pub fn inner_faces(&self) -> &InnerFaceConnectivity {
        &self.inner_faces
    }

    /// Move the interior faces out, leaving the grid without faces
    pub fn take_inner_faces(&mut self) -> InnerFaceConnectivity {
        std::mem::take(&mut self.inner_faces)
    }

    /// Consume the grid into its cell volumes and interior faces
    pub fn into_parts(self) -> (Vec<f64>, InnerFaceConnectivity) {
        (self.cell_volumes, self.inner_faces)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
