//! Mesh data consumed by the kernel
//!
//! Mesh generation and file parsing are external. This module only stores
//! what face assembly needs (cell volumes, interior-face normals, areas and
//! owner/neighbor pairs) and rejects malformed connectivity before a
//! simulation can start.

pub mod grid;

pub use grid::{Grid, InnerFaceConnectivity, NORMAL_TOLERANCE};
