//! Transformations of shapes into other representations.

pub mod voxelization;

#[cfg(feature = "wavefront")]
pub mod wavefront;
