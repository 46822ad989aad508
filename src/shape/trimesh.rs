use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::Bvh;
use crate::shape::Triangle;
use crate::utils::hashmap::HashMap;
use crate::utils::SortedPair;
use std::fmt;

/// Indicated an inconsistency in the topology of a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// Found a triangle with two or three identical vertices.
    #[error("the triangle {0} has at least two identical vertices.")]
    BadTriangle(u32),
    /// At least two adjacent triangles have opposite orientations.
    #[error("the triangles {triangle1} and {triangle2} sharing the edge {edge:?} have opposite orientations.")]
    BadAdjacentTrianglesOrientation {
        /// The first triangle, with an orientation opposite to the second triangle.
        triangle1: u32,
        /// The second triangle, with an orientation opposite to the first triangle.
        triangle2: u32,
        /// The edge shared between the two triangles.
        edge: (u32, u32),
    },
}

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that doesn’t exist.
    #[error("the triangle {triangle} references the vertex {index} which doesn’t exist.")]
    IndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
    },
    /// Indicated an inconsistency in the topology of a triangle mesh.
    #[error("Topology Error: {0}")]
    TopologyError(#[from] TopologyError),
}

/// A vertex of a triangle-mesh’s half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoVertex {
    /// One of the half-edge with this vertex as endpoint.
    pub half_edge: u32,
}

/// A face of a triangle-mesh’s half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoFace {
    /// The half-edge adjacent to this face, with a starting point equal
    /// to the first point of this face.
    pub half_edge: u32,
}

/// A half-edge of a triangle-mesh’s half-edge topology.
#[derive(Clone, Copy, Debug)]
pub struct TopoHalfEdge {
    /// The next half-edge.
    pub next: u32,
    /// This half-edge twin on the adjacent triangle.
    ///
    /// This is `u32::MAX` if there is no twin: either the edge is on the border of the mesh,
    /// or it is shared by more than two triangles.
    pub twin: u32,
    /// The first vertex of this edge.
    pub vertex: u32,
    /// The face associated to this half-edge.
    pub face: u32,
}

/// The half-edge topology information of a triangle mesh.
#[derive(Default, Clone, Debug)]
pub struct TriMeshTopology {
    /// The vertices of this half-edge representation.
    pub vertices: Vec<TopoVertex>,
    /// The faces of this half-edge representation.
    pub faces: Vec<TopoFace>,
    /// The half-edges of this half-edge representation.
    pub half_edges: Vec<TopoHalfEdge>,
    /// The number of half-edges on the border of the mesh, i.e., without any opposite
    /// half-edge. This is zero iff the mesh is closed.
    pub num_border_half_edges: usize,
    /// The number of undirected edges shared by more than two faces.
    pub num_non_manifold_edges: usize,
}

impl TriMeshTopology {
    /// Is the mesh this topology was computed from closed?
    pub fn is_closed(&self) -> bool {
        self.num_border_half_edges == 0
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Controls how a [`TriMesh`] should be loaded.
pub struct TriMeshFlags(u16);

bitflags::bitflags! {
    impl TriMeshFlags: u16 {
        /// If set, the half-edge topology of the trimesh will be computed.
        ///
        /// This gives access to facet adjacency, and lets the mesh tell whether it is closed.
        const HALF_EDGE_TOPOLOGY = 1;
    }
}

#[derive(Clone)]
/// A triangle mesh.
///
/// The mesh stores its bounding box and a [`Bvh`] over the AABBs of its facets, with leaf
/// `i` associated to the triangle `i`.
pub struct TriMesh {
    bvh: Bvh,
    aabb: Aabb,
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    topology: Option<TriMeshTopology>,
    flags: TriMeshFlags,
}

impl fmt::Debug for TriMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriMesh")
            .field("num_vertices", &self.vertices.len())
            .field("num_triangles", &self.indices.len())
            .field("aabb", &self.aabb)
            .field("flags", &self.flags)
            .finish()
    }
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        Self::with_flags(vertices, indices, TriMeshFlags::empty())
    }

    /// Creates a new triangle mesh from a vertex buffer and an index buffer, and flags controlling optional properties.
    pub fn with_flags(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        flags: TriMeshFlags,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        for (fid, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: fid as u32,
                    index: *index,
                });
            }
        }

        let mut result = Self {
            bvh: Bvh::new(),
            aabb: Aabb::new_invalid(),
            vertices,
            indices,
            topology: None,
            flags: TriMeshFlags::empty(),
        };

        result.set_flags(flags)?;
        result.rebuild_bvh();

        Ok(result)
    }

    /// Sets the flags of this triangle mesh, controlling its optional associated data.
    pub fn set_flags(&mut self, flags: TriMeshFlags) -> Result<(), TopologyError> {
        if !flags.contains(TriMeshFlags::HALF_EDGE_TOPOLOGY) {
            self.topology = None;
        }

        let difference = flags & !self.flags;

        if difference.contains(TriMeshFlags::HALF_EDGE_TOPOLOGY) {
            self.compute_topology()?;
        }

        self.flags = flags;
        Ok(())
    }

    fn rebuild_bvh(&mut self) {
        let leaves: Vec<_> = self.triangles().map(|tri| tri.local_aabb()).collect();
        self.bvh = Bvh::from_leaves(&leaves);
        // The union of the facet AABBs bounds exactly the referenced vertices.
        self.aabb = self.bvh.root_aabb();
    }

    /// Computes the half-edge topology of this mesh.
    ///
    /// Unlike a strict half-edge structure, edges shared by more than two faces are accepted as
    /// long as they are used the same number of times in both directions. Such edges don’t get
    /// any twin.
    fn compute_topology(&mut self) -> Result<(), TopologyError> {
        let mut topology = TriMeshTopology::default();
        // For each directed edge: its number of occurrences and its last half-edge.
        let mut half_edge_map: HashMap<(u32, u32), (u32, u32)> = HashMap::default();
        let mut edge_valence: HashMap<SortedPair<u32>, u32> = HashMap::default();

        topology.vertices.resize(
            self.vertices.len(),
            TopoVertex {
                half_edge: u32::MAX,
            },
        );

        // First, create three half-edges for each face.
        for (fid, idx) in self.indices.iter().enumerate() {
            let half_edge_base_id = topology.half_edges.len() as u32;

            if idx[0] == idx[1] || idx[0] == idx[2] || idx[1] == idx[2] {
                return Err(TopologyError::BadTriangle(fid as u32));
            }

            for k in 0u32..3 {
                let half_edge = TopoHalfEdge {
                    next: half_edge_base_id + (k + 1) % 3,
                    // Assigned in the second pass.
                    twin: u32::MAX,
                    vertex: idx[k as usize],
                    face: fid as u32,
                };
                topology.half_edges.push(half_edge);

                let edge_key = (idx[k as usize], idx[(k as usize + 1) % 3]);
                let entry = half_edge_map.entry(edge_key).or_insert((0, u32::MAX));
                entry.0 += 1;
                entry.1 = half_edge_base_id + k;
                *edge_valence
                    .entry(SortedPair::new(edge_key.0, edge_key.1))
                    .or_insert(0) += 1;

                topology.vertices[idx[k as usize] as usize].half_edge = half_edge_base_id + k;
            }

            topology.faces.push(TopoFace {
                half_edge: half_edge_base_id,
            })
        }

        // Second, check orientations and identify twins. Half-edges are visited in face order,
        // so the reported conflict is the one involving the lowest face index.
        for he1 in 0..topology.half_edges.len() as u32 {
            let half_edge = topology.half_edges[he1 as usize];
            let key = (
                half_edge.vertex,
                topology.half_edges[half_edge.next as usize].vertex,
            );
            let (count, last_he) = half_edge_map[&key];
            let (twin_count, he2) = half_edge_map
                .get(&(key.1, key.0))
                .copied()
                .unwrap_or((0, u32::MAX));

            if count > 1 && twin_count < count {
                // The same edge is used several times with the same vertex order: at least
                // two triangles sharing it have incompatible orientations.
                return Err(TopologyError::BadAdjacentTrianglesOrientation {
                    edge: key,
                    triangle1: half_edge.face,
                    triangle2: topology.half_edges[last_he as usize].face,
                });
            }

            if twin_count == 0 {
                topology.num_border_half_edges += 1;
            } else if key.0 < key.1 && count == 1 && twin_count == 1 {
                topology.half_edges[he1 as usize].twin = he2;
                topology.half_edges[he2 as usize].twin = he1;
            }
        }

        topology.num_non_manifold_edges = edge_valence
            .values()
            .filter(|valence| **valence > 2)
            .count();

        self.topology = Some(topology);

        Ok(())
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// A bounding box of this mesh, in its local-space.
    ///
    /// Only the vertices referenced by at least one triangle are taken into account.
    pub fn local_aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// The acceleration structure used by this triangle-mesh.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The number of triangles forming this mesh.
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// Get the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: u32) -> Triangle {
        let idx = self.indices[i as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Returns the topology information of this trimesh, if it has been computed.
    pub fn topology(&self) -> Option<&TriMeshTopology> {
        self.topology.as_ref()
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// This is only meaningful for closed meshes. It is positive if the triangles are oriented
    /// with outward normals.
    pub fn signed_volume(&self) -> Real {
        self.triangles()
            .map(|tri| tri.signed_volume_from_origin())
            .sum()
    }
}
