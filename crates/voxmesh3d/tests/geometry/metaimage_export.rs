use crate::{temp_path, two_cubes};
use voxmesh3d::transformation::voxelization::{VoxelGrid, VoxelizationParameters};

#[test]
fn metaimage_files_describe_the_grid() {
    let mesh = two_cubes();
    let params = VoxelizationParameters::with_spacing(0.25);
    let grid = VoxelGrid::<u16>::voxelize(&mesh, &params, None).unwrap();

    let (header_path, raw_path) = grid.write_metaimage(temp_path("cubes.out")).unwrap();
    assert_eq!(header_path.extension().unwrap(), "mhd");
    assert_eq!(raw_path.extension().unwrap(), "raw");

    let header = std::fs::read_to_string(&header_path).unwrap();
    let raw = std::fs::read(&raw_path).unwrap();
    let raw_name = raw_path.file_name().unwrap().to_str().unwrap();

    assert!(header.contains("NDims = 3\n"));
    assert!(header.contains("DimSize = 12 4 4\n"));
    assert!(header.contains("ElementType = MET_USHORT\n"));
    assert!(header.contains(&format!("ElementDataFile = {}\n", raw_name)));
    assert_eq!(raw.len(), grid.num_voxels() * 2);

    let num_occupied = raw.chunks_exact(2).filter(|v| *v == [1, 0]).count();
    assert_eq!(num_occupied, grid.num_occupied());

    std::fs::remove_file(header_path).unwrap();
    std::fs::remove_file(raw_path).unwrap();
}
