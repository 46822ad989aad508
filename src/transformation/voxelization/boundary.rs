use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::{TriMesh, TriMeshFlags};
use crate::transformation::voxelization::{linear_index, Occupancy, VoxelGrid, VoxelizationError};

/// Coordinate system of the vertices of a boundary mesh.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BoundaryScaling {
    /// The mesh is translated and uniformly scaled so that the minimum corner of its AABB is at
    /// the origin, and the largest side of its AABB has a length of 1.
    #[default]
    UnitBox,
    /// The vertices are kept at the world-space position of the voxel corners.
    World,
}

/// Offsets of the eight corners of a voxel.
const CORNERS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// The faces of a voxel: the axis of their normal, whether the normal points toward positive
/// coordinates, and the four corners `[v1, v2, v3, v4]` of the face, split into the triangles
/// `(v1, v2, v3)` and `(v3, v2, v4)` with outward normals.
const FACES: [(usize, bool, [usize; 4]); 6] = [
    (0, false, [0, 4, 3, 7]),
    (0, true, [2, 6, 1, 5]),
    (1, false, [1, 5, 0, 4]),
    (1, true, [3, 7, 2, 6]),
    (2, false, [0, 3, 1, 2]),
    (2, true, [4, 5, 7, 6]),
];

impl<T: Occupancy> VoxelGrid<T> {
    /// Is there an occupied voxel next to the voxel `coords`, along `axis`?
    fn has_occupied_neighbor(&self, coords: &Point<u32>, axis: usize, positive: bool) -> bool {
        let mut neighbor = *coords;

        if positive {
            if neighbor[axis] + 1 >= self.size()[axis] {
                return false;
            }
            neighbor[axis] += 1;
        } else {
            if neighbor[axis] == 0 {
                return false;
            }
            neighbor[axis] -= 1;
        }

        self.is_occupied(self.linear_index(&neighbor))
    }

    /// Computes the vertex and index buffers of the boundary of the occupied voxels.
    ///
    /// Every face separating an occupied voxel from an empty voxel, or from the outside of the
    /// grid, is output as two triangles, with normals pointing toward the empty side. Faces
    /// share their vertices: each voxel corner results in at most one vertex, created the first
    /// time it is needed.
    ///
    /// The result is empty if no voxel is occupied.
    pub fn boundary_buffers(&self, scaling: BoundaryScaling) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
        let node_size = self.node_grid_size();
        let mut node_ids = vec![u32::MAX; node_size.iter().map(|n| *n as usize).product()];
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for coords in self.occupied_voxels() {
            for (axis, positive, corners) in &FACES {
                if self.has_occupied_neighbor(&coords, *axis, *positive) {
                    continue;
                }

                let face = corners.map(|k| {
                    let node = coords + Vector::from(CORNERS[k]);
                    let node_id = &mut node_ids[linear_index(&node_size, &node)];

                    if *node_id == u32::MAX {
                        *node_id = vertices.len() as u32;
                        vertices.push(self.node_position(&node));
                    }

                    *node_id
                });

                indices.push([face[0], face[1], face[2]]);
                indices.push([face[2], face[1], face[3]]);
            }
        }

        if scaling == BoundaryScaling::UnitBox && !vertices.is_empty() {
            let aabb = Aabb::from_points_ref(&vertices);
            let scale = 1.0 / aabb.max_extent();

            for pt in &mut vertices {
                *pt = ((*pt - aabb.mins) * scale).into();
            }
        }

        log::debug!(
            "Boundary of {} occupied voxels: {} vertices, {} triangles.",
            self.num_occupied(),
            vertices.len(),
            indices.len()
        );

        (vertices, indices)
    }

    /// Computes the boundary of the occupied voxels as a triangle mesh.
    ///
    /// See [`VoxelGrid::boundary_buffers`]. The mesh is built with its half-edge topology, which
    /// gives the adjacency between its triangles. Voxels touching only along an edge result in
    /// edges shared by four triangles; these edges don’t have any twin in the topology.
    ///
    /// Returns [`VoxelizationError::EmptyBoundary`] if no voxel is occupied.
    pub fn boundary_mesh(&self, scaling: BoundaryScaling) -> Result<TriMesh, VoxelizationError> {
        let (vertices, indices) = self.boundary_buffers(scaling);

        if indices.is_empty() {
            return Err(VoxelizationError::EmptyBoundary);
        }

        let mesh = TriMesh::with_flags(vertices, indices, TriMeshFlags::HALF_EDGE_TOPOLOGY)?;

        log::info!(
            "Built a boundary mesh with {} vertices and {} triangles.",
            mesh.vertices().len(),
            mesh.num_triangles()
        );

        Ok(mesh)
    }
}
