use crate::{cuboid, cuboid_buffers, two_cubes, uv_sphere};
use approx::assert_relative_eq;
use voxmesh3d::bounding_volume::Aabb;
use voxmesh3d::math::{Point, Real, Vector};
use voxmesh3d::shape::TriMesh;
use voxmesh3d::transformation::voxelization::{
    CancelToken, VoxelGrid, VoxelizationError, VoxelizationParameters,
};

#[test]
fn unit_cube_fills_its_grid() {
    let mesh = cuboid(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let params = VoxelizationParameters::with_spacing(0.5);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();

    assert_eq!(grid.size(), Vector::new(2, 2, 2));
    assert_eq!(grid.num_occupied(), 8);
}

#[test]
fn padding_stays_empty() {
    let mesh = cuboid(Point::origin(), Point::new(1.0, 1.0, 1.0));
    let params = VoxelizationParameters::with_spacing(0.5).padding(1);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();

    assert_eq!(grid.size(), Vector::new(4, 4, 4));
    assert_relative_eq!(grid.origin(), Point::new(-0.5, -0.5, -0.5));
    assert_eq!(grid.num_occupied(), 8);

    for coords in grid.occupied_voxels() {
        assert!(coords.iter().all(|c| (1..=2).contains(c)), "{:?}", coords);
    }
}

#[test]
fn sphere_volume_is_approximated() {
    let mesh = uv_sphere(Point::new(0.1, -0.2, 0.3), 1.0, 32, 64);
    let params = VoxelizationParameters::with_spacing(0.05);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();

    let mesh_volume = mesh.signed_volume();
    let voxel_volume = grid.num_occupied() as Real * grid.spacing().powi(3);

    assert!(mesh_volume > 4.0);
    assert_relative_eq!(voxel_volume, mesh_volume, max_relative = 0.02);

    for coords in grid.occupied_voxels() {
        let center = grid.voxel_center(&coords);
        assert!(
            (center - Point::new(0.1, -0.2, 0.3)).norm() < 1.0,
            "{:?} is outside of the sphere",
            center
        );
    }
}

#[test]
fn voxel_count_sets_the_spacing() {
    let mesh = uv_sphere(Point::origin(), 2.0, 8, 16);
    let params = VoxelizationParameters::with_voxels_along_longest_axis(20);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();

    assert_relative_eq!(
        grid.spacing(),
        mesh.local_aabb().max_extent() / 20.0,
        epsilon = 1.0e-6
    );
}

#[test]
fn disjoint_cubes_yield_disjoint_blocks() {
    let mesh = two_cubes();
    let params = VoxelizationParameters::with_spacing(0.25);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();

    assert_eq!(grid.size(), Vector::new(12, 4, 4));
    assert_eq!(grid.num_occupied(), 2 * 4 * 4 * 4);

    for index in 0..grid.num_voxels() {
        let coords = grid.voxel_coords(index);
        let in_block = coords.x < 4 || coords.x >= 8;
        assert_eq!(grid.is_occupied(index), in_block, "{:?}", coords);
    }
}

#[test]
fn open_surface_reports_odd_columns() {
    let (vertices, mut indices) = cuboid_buffers(Point::origin(), Point::new(1.0, 1.0, 1.0));
    // Remove the top face.
    let _ = indices.split_off(10);
    let mesh = TriMesh::new(vertices, indices).unwrap();

    let params = VoxelizationParameters::with_spacing(0.5);
    let mut grid = VoxelGrid::<u8>::from_aabb(mesh.local_aabb(), &params).unwrap();
    let stats = grid.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();

    assert_eq!(stats.num_columns, 4);
    assert_eq!(stats.num_crossings, 4);
    assert_eq!(stats.num_odd_columns, 4);
    assert_eq!(grid.num_occupied(), 0);
}

#[test]
fn closed_surface_has_no_odd_column() {
    let mesh = uv_sphere(Point::origin(), 1.0, 12, 24);
    let params = VoxelizationParameters::with_spacing(0.1);
    let mut grid = VoxelGrid::<u8>::from_aabb(mesh.local_aabb(), &params).unwrap();
    let stats = grid.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();

    assert_eq!(stats.num_columns, (grid.size().x * grid.size().y) as usize);
    assert_eq!(stats.num_odd_columns, 0);
    assert_eq!(stats.num_crossings % 2, 0);
}

#[test]
fn rays_through_face_diagonals_cross_once() {
    // Column centers at x + y = 3 lie on the diagonals splitting the top and bottom faces.
    let mesh = cuboid(Point::origin(), Point::new(3.0, 3.0, 3.0));
    let params = VoxelizationParameters::with_spacing(1.0);
    let mut grid = VoxelGrid::<u8>::from_aabb(mesh.local_aabb(), &params).unwrap();
    let stats = grid.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();

    assert_eq!(grid.size(), Vector::new(3, 3, 3));
    assert_eq!(stats.num_columns, 9);
    assert_eq!(stats.num_crossings, 18);
    assert_eq!(stats.num_odd_columns, 0);
    assert_eq!(grid.num_occupied(), 27);
}

#[test]
fn rays_through_shared_vertices_cross_once() {
    // The central column passes through both apices, the four columns next to it run along
    // the projections of the edges joining the apices to the equator.
    let top = Point::new(1.5, 1.5, 2.0);
    let bottom = Point::new(1.5, 1.5, 0.0);
    let equator = [
        Point::new(3.0, 1.5, 1.0),
        Point::new(1.5, 3.0, 1.0),
        Point::new(0.0, 1.5, 1.0),
        Point::new(1.5, 0.0, 1.0),
    ];
    let mut vertices = vec![top, bottom];
    vertices.extend(equator);

    let mut indices = Vec::new();
    for i in 0..4 {
        let (a, b) = (2 + i, 2 + (i + 1) % 4);
        indices.push([0, a, b]);
        indices.push([1, b, a]);
    }

    let mesh = TriMesh::new(vertices, indices).unwrap();
    assert!(mesh.signed_volume() > 0.0);

    let params = VoxelizationParameters::with_spacing(1.0);
    let mut grid = VoxelGrid::<u8>::from_aabb(mesh.local_aabb(), &params).unwrap();
    let stats = grid.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();

    assert_eq!(grid.size(), Vector::new(3, 3, 2));
    assert_eq!(stats.num_odd_columns, 0);
    assert_eq!(stats.num_crossings, 10);
    assert_eq!(grid.num_occupied(), 2);
    assert!(grid
        .occupied_voxels()
        .all(|coords| coords.x == 1 && coords.y == 1));
}

#[test]
fn cancelled_before_start() {
    let mesh = two_cubes();
    let params = VoxelizationParameters::with_spacing(0.25);
    let cancel = CancelToken::new();
    cancel.cancel();

    assert_eq!(
        VoxelGrid::<u8>::voxelize(&mesh, &params, Some(&cancel)),
        Err(VoxelizationError::Cancelled)
    );

    let mut grid = VoxelGrid::<u8>::from_aabb(mesh.local_aabb(), &params).unwrap();
    assert_eq!(
        grid.fill_ray_parity(&mesh, mesh.bvh(), Some(&cancel.clone())),
        Err(VoxelizationError::Cancelled)
    );
    assert_eq!(grid.num_occupied(), 0);
}

#[test]
fn classification_is_deterministic_and_toggles() {
    let mesh = uv_sphere(Point::new(0.5, 0.5, 0.5), 0.7, 10, 20);
    let params = VoxelizationParameters::with_spacing(0.1).padding(2);

    let grid1 = VoxelGrid::<u16>::voxelize(&mesh, &params, None).unwrap();
    let grid2 = VoxelGrid::<u16>::voxelize(&mesh, &params, None).unwrap();
    assert_eq!(grid1, grid2);
    assert!(grid1.num_occupied() > 0);

    // Filling a second time flips every inner voxel back.
    let mut grid3 = grid1.clone();
    let _ = grid3.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();
    assert_eq!(grid3.num_occupied(), 0);
}

#[test]
fn brute_force_index_matches_bvh() {
    let mesh = uv_sphere(Point::new(-1.0, 2.0, 0.0), 1.5, 9, 17);
    let params = VoxelizationParameters::with_spacing(0.1);
    let leaves: Vec<Aabb> = mesh.triangles().map(|tri| tri.local_aabb()).collect();

    let mut with_bvh = VoxelGrid::<f32>::from_aabb(mesh.local_aabb(), &params).unwrap();
    let mut brute_force = with_bvh.clone();
    let stats_bvh = with_bvh.fill_ray_parity(&mesh, mesh.bvh(), None).unwrap();
    let stats_brute_force = brute_force
        .fill_ray_parity(&mesh, leaves.as_slice(), None)
        .unwrap();

    assert_eq!(stats_bvh, stats_brute_force);
    assert_eq!(with_bvh, brute_force);
}
