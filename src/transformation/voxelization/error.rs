use crate::math::{Real, Vector};
use crate::shape::TriMeshBuilderError;

/// Error raised while building, filling, or reconstructing the boundary of a voxel grid.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum VoxelizationError {
    /// The voxel spacing is zero, negative, or not finite.
    #[error("the voxel spacing must be positive and finite, got {0}.")]
    InvalidSpacing(Real),
    /// The requested number of voxels along the longest axis is zero.
    #[error("the number of voxels along the longest axis must be positive.")]
    InvalidVoxelCount,
    /// The voxelized domain is flat, empty, or not finite along at least one axis.
    #[error("the extents {0:?} of the voxelized domain must be positive and finite along every axis.")]
    DegenerateExtents(Vector<Real>),
    /// The number of voxels doesn’t fit in memory addresses.
    #[error("the voxel grid is too large to be allocated.")]
    GridTooLarge,
    /// The classification was interrupted through a [`CancelToken`](super::CancelToken).
    #[error("the voxelization was cancelled.")]
    Cancelled,
    /// The grid has no occupied voxel, so it has no boundary.
    #[error("the voxel grid has no occupied voxel, its boundary is empty.")]
    EmptyBoundary,
    /// The boundary mesh could not be built.
    #[error("failed to build the boundary mesh: {0}")]
    TriMesh(#[from] TriMeshBuilderError),
}
