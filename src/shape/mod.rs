//! Shapes supported by voxmesh.

pub use self::triangle::Triangle;
pub use self::trimesh::*;

mod triangle;
mod trimesh;
