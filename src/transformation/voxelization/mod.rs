//! Voxelization of closed triangle meshes into dense occupancy grids, and reconstruction of
//! boundary meshes from these grids.

pub use self::boundary::BoundaryScaling;
pub use self::cancel::CancelToken;
pub use self::error::VoxelizationError;
pub use self::occupancy::Occupancy;
pub use self::parameters::{VoxelResolution, VoxelizationParameters};
pub use self::ray_parity::RayParityStats;
pub use self::voxel_grid::{coords_from_linear_index, linear_index, VoxelGrid};

mod boundary;
mod cancel;
mod error;
mod metaimage;
mod occupancy;
mod parameters;
mod ray_parity;
mod voxel_grid;
