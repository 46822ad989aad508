use crate::{two_cubes, uv_sphere};
use approx::assert_relative_eq;
use voxmesh3d::math::{Point, Real, Vector};
use voxmesh3d::shape::TriMesh;
use voxmesh3d::transformation::voxelization::{
    BoundaryScaling, VoxelGrid, VoxelizationParameters,
};
use voxmesh3d::utils::hashmap::HashMap;

fn random_grid(seed: u64) -> VoxelGrid<u8> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut grid = VoxelGrid::new(Point::new(1.0, -2.0, 0.5), Vector::new(3.0, 2.5, 2.0), 0.5, 0)
        .unwrap();

    for index in 0..grid.num_voxels() {
        if rng.rand_float() < 0.4 {
            grid.set(index, 1);
        }
    }

    grid
}

#[test]
fn random_boundary_edges_are_balanced() {
    for seed in 0..10 {
        let grid = random_grid(seed);
        let (vertices, indices) = grid.boundary_buffers(BoundaryScaling::World);
        let mut edges = HashMap::default();

        for tri in &indices {
            for k in 0..3 {
                *edges.entry((tri[k], tri[(k + 1) % 3])).or_insert(0usize) += 1;
            }
        }

        for ((a, b), count) in &edges {
            assert_eq!(edges.get(&(*b, *a)), Some(count), "edge {} -> {}", a, b);
        }

        // Outward normals: the enclosed volume is the volume of the occupied voxels.
        let mesh = TriMesh::new(vertices, indices).unwrap();
        let expected = grid.num_occupied() as Real * grid.spacing().powi(3);
        assert_relative_eq!(mesh.signed_volume(), expected, epsilon = 1.0e-3);
    }
}

#[test]
fn random_boundary_mesh_has_topology() {
    for seed in 10..20 {
        let grid = random_grid(seed);
        let mesh = grid.boundary_mesh(BoundaryScaling::UnitBox).unwrap();
        let topology = mesh.topology().unwrap();

        assert_eq!(topology.num_border_half_edges, 0);
        assert_eq!(topology.faces.len(), mesh.num_triangles());
        assert_relative_eq!(mesh.local_aabb().mins, Point::origin(), epsilon = 1.0e-6);
        assert_relative_eq!(mesh.local_aabb().max_extent(), 1.0, epsilon = 1.0e-6);
    }
}

#[test]
fn voxelized_blocks_are_closed_boxes() {
    let mesh = two_cubes();
    let params = VoxelizationParameters::with_spacing(0.25).padding(1);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();
    let boundary = grid.boundary_mesh(BoundaryScaling::World).unwrap();

    // Two boxes of 4x4x4 voxels, each face split into 4x4 squares.
    assert_eq!(boundary.num_triangles(), 2 * 6 * 16 * 2);
    assert_eq!(boundary.vertices().len(), 2 * (5 * 5 * 5 - 3 * 3 * 3));
    assert!(boundary.topology().unwrap().is_closed());
    assert_relative_eq!(boundary.signed_volume(), 2.0, epsilon = 1.0e-4);
    assert_relative_eq!(boundary.local_aabb().mins, Point::origin(), epsilon = 1.0e-5);
    assert_relative_eq!(
        boundary.local_aabb().maxs,
        Point::new(3.0, 1.0, 1.0),
        epsilon = 1.0e-5
    );
}

#[test]
fn sphere_boundary_is_closed() {
    let mesh = uv_sphere(Point::origin(), 1.0, 16, 32);
    let params = VoxelizationParameters::with_voxels_along_longest_axis(16);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();
    let boundary = grid.boundary_mesh(BoundaryScaling::UnitBox).unwrap();

    assert_eq!(boundary.topology().unwrap().num_border_half_edges, 0);
    assert!(boundary.signed_volume() > 0.0);
    assert!(boundary.local_aabb().maxs.iter().all(|x| *x <= 1.0 + 1.0e-5));
}
