mod boundary_reconstruction;
mod metaimage_export;
mod ray_parity_voxelization;
#[cfg(feature = "wavefront")]
mod wavefront_round_trip;

use std::f32::consts::PI;
use voxmesh3d::math::{Point, Real, Vector};
use voxmesh3d::shape::TriMesh;

/// The corners `[v1, v2, v3, v4]` of each face of a box, indexing the vertices built by
/// [`cuboid_buffers`], split into the triangles `(v1, v2, v3)` and `(v3, v2, v4)`.
const BOX_FACES: [[u32; 4]; 6] = [
    [0, 4, 3, 7],
    [2, 6, 1, 5],
    [1, 5, 0, 4],
    [3, 7, 2, 6],
    [0, 3, 1, 2],
    [4, 5, 7, 6],
];

/// The 12 triangles of the axis-aligned box `[mins, maxs]`, with outward normals.
pub fn cuboid_buffers(mins: Point<Real>, maxs: Point<Real>) -> (Vec<Point<Real>>, Vec<[u32; 3]>) {
    let vertices = vec![
        Point::new(mins.x, mins.y, mins.z),
        Point::new(maxs.x, mins.y, mins.z),
        Point::new(maxs.x, maxs.y, mins.z),
        Point::new(mins.x, maxs.y, mins.z),
        Point::new(mins.x, mins.y, maxs.z),
        Point::new(maxs.x, mins.y, maxs.z),
        Point::new(maxs.x, maxs.y, maxs.z),
        Point::new(mins.x, maxs.y, maxs.z),
    ];
    let indices = BOX_FACES
        .iter()
        .flat_map(|[a, b, c, d]| [[*a, *b, *c], [*c, *b, *d]])
        .collect();

    (vertices, indices)
}

pub fn cuboid(mins: Point<Real>, maxs: Point<Real>) -> TriMesh {
    let (vertices, indices) = cuboid_buffers(mins, maxs);
    TriMesh::new(vertices, indices).unwrap()
}

/// Two unit cubes along the X axis, separated by a gap of length 1.
pub fn two_cubes() -> TriMesh {
    let (mut vertices, mut indices) = cuboid_buffers(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let (vertices2, indices2) = cuboid_buffers(Point::new(2.0, 0.0, 0.0), Point::new(3.0, 1.0, 1.0));
    let base = vertices.len() as u32;

    vertices.extend(vertices2);
    indices.extend(indices2.iter().map(|idx| idx.map(|i| i + base)));

    TriMesh::new(vertices, indices).unwrap()
}

/// A UV sphere with outward normals.
pub fn uv_sphere(center: Point<Real>, radius: Real, nlat: u32, nlon: u32) -> TriMesh {
    let mut vertices = vec![center + Vector::z() * radius];

    for i in 1..nlat {
        let theta = PI as Real * i as Real / nlat as Real;

        for j in 0..nlon {
            let phi = 2.0 * PI as Real * j as Real / nlon as Real;
            let dir = Vector::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos());
            vertices.push(center + dir * radius);
        }
    }

    vertices.push(center - Vector::z() * radius);

    let ring = |i: u32, j: u32| 1 + (i - 1) * nlon + j % nlon;
    let south = vertices.len() as u32 - 1;
    let mut indices = Vec::new();

    for j in 0..nlon {
        indices.push([0, ring(1, j), ring(1, j + 1)]);

        for i in 1..nlat - 1 {
            let (a, b) = (ring(i, j), ring(i + 1, j));
            let (c, d) = (ring(i + 1, j + 1), ring(i, j + 1));
            indices.push([a, b, c]);
            indices.push([a, c, d]);
        }

        indices.push([ring(nlat - 1, j), south, ring(nlat - 1, j + 1)]);
    }

    TriMesh::new(vertices, indices).unwrap()
}

/// A path in the temporary directory unique to this test process.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("voxmesh-{}-{}", std::process::id(), name))
}
