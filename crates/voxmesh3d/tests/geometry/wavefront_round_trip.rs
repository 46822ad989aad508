use crate::{temp_path, two_cubes};
use approx::assert_relative_eq;
use voxmesh3d::shape::TriMesh;
use voxmesh3d::transformation::voxelization::{
    BoundaryScaling, VoxelGrid, VoxelizationParameters,
};

#[test]
fn boundary_mesh_obj_round_trip() {
    let mesh = two_cubes();
    let params = VoxelizationParameters::with_spacing(0.5);
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None).unwrap();
    let boundary = grid.boundary_mesh(BoundaryScaling::UnitBox).unwrap();

    let path = temp_path("boundary.obj");
    boundary.to_obj_file(&path).unwrap();
    let loaded = TriMesh::from_obj_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.indices(), boundary.indices());
    assert_eq!(loaded.vertices().len(), boundary.vertices().len());

    for (a, b) in loaded.vertices().iter().zip(boundary.vertices()) {
        assert_relative_eq!(*a, *b, epsilon = 1.0e-6);
    }
}

#[test]
fn obj_polygons_are_triangulated() {
    let path = temp_path("quad.obj");
    std::fs::write(
        &path,
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nf 1 2 3 4\nf 1 2 5\n",
    )
    .unwrap();
    let loaded = TriMesh::from_obj_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.indices(), &[[0, 1, 2], [0, 2, 3], [0, 1, 4]]);
}
