/*!
voxmesh
========

**voxmesh** converts closed triangle meshes into dense voxel occupancy grids,
and reconstructs watertight boundary meshes from those grids.

The pipeline is:
1. build a [`VoxelGrid`](crate::transformation::voxelization::VoxelGrid) from the mesh bounding box,
2. fill it with [`VoxelGrid::fill_ray_parity`](crate::transformation::voxelization::VoxelGrid::fill_ray_parity),
   casting one vertical ray per grid column and applying the even-odd rule,
3. either export the grid as a MetaImage volume, or extract its boundary with
   [`VoxelGrid::boundary_mesh`](crate::transformation::voxelization::VoxelGrid::boundary_mesh).

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod partitioning;
pub mod shape;
pub mod transformation;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Point2, Point3, Vector3};

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
