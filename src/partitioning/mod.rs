//! Spatial partitioning tools.

pub use self::bvh::{Bvh, BvhNode};
pub use self::spatial_index::FacetSpatialIndex;

pub mod bvh;
mod spatial_index;
