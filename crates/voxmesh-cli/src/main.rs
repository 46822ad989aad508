use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use voxmesh3d::math::Real;
use voxmesh3d::shape::{TriMesh, TriMeshFlags};
use voxmesh3d::transformation::voxelization::{
    BoundaryScaling, VoxelGrid, VoxelizationParameters,
};

/// Voxelizes a closed triangle mesh
///
/// The output is either the boundary mesh of the occupied voxels (if its
/// extension is `.obj`), or the occupancy grid as a MetaImage volume.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Input Wavefront (`.obj`) file
    input: PathBuf,

    /// Output file (`.obj` for a mesh, anything else for a MetaImage volume)
    #[clap(default_value = "output")]
    output: PathBuf,

    /// Number of empty voxels added around the mesh on each side
    #[clap(short, long, default_value_t = 0)]
    padding: u32,

    /// Voxel edge length, in mesh units
    #[clap(short, long, default_value_t = 1.0)]
    resolution: Real,

    /// Number of voxels along the longest axis of the mesh (overrides
    /// `--resolution`)
    #[clap(short, long)]
    num_voxels: Option<u32>,

    /// Keep the boundary mesh in world coordinates instead of rescaling it
    /// to the unit box
    #[clap(short, long)]
    world_coordinates: bool,

    /// Number of threads to use
    #[clap(short, long)]
    threads: Option<NonZeroUsize>,
}

fn load_mesh(path: &Path) -> Result<TriMesh> {
    let mut mesh = TriMesh::from_obj_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    match mesh.set_flags(TriMeshFlags::HALF_EDGE_TOPOLOGY) {
        Ok(()) => {
            let topology = mesh.topology().context("missing mesh topology")?;
            if !topology.is_closed() {
                warn!(
                    "The mesh has {} border half-edges; the voxelization of an open surface \
                     is unreliable",
                    topology.num_border_half_edges
                );
            }
        }
        Err(e) => warn!("Could not compute the mesh topology: {e}"),
    }

    Ok(mesh)
}

fn is_mesh_output(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n.get())
            .build_global()?;
    }

    let now = Instant::now();
    let mesh = load_mesh(&args.input)?;
    info!(
        "Loaded {} triangles in {:?}",
        mesh.num_triangles(),
        now.elapsed()
    );

    let params = match args.num_voxels {
        Some(n) => VoxelizationParameters::with_voxels_along_longest_axis(n),
        None => VoxelizationParameters::with_spacing(args.resolution),
    }
    .padding(args.padding);

    let start = Instant::now();
    let grid = VoxelGrid::<u8>::voxelize(&mesh, &params, None)?;
    info!("Voxelized mesh in {:?}", start.elapsed());

    let start = Instant::now();
    if is_mesh_output(&args.output) {
        let scaling = if args.world_coordinates {
            BoundaryScaling::World
        } else {
            BoundaryScaling::UnitBox
        };
        let boundary = grid.boundary_mesh(scaling)?;
        boundary.to_obj_file(&args.output).with_context(|| {
            format!("failed to write {}", args.output.display())
        })?;
        info!(
            "Wrote boundary mesh to {} in {:?}",
            args.output.display(),
            start.elapsed()
        );
    } else {
        let (header, _) =
            grid.write_metaimage(&args.output).with_context(|| {
                format!("failed to write {}", args.output.display())
            })?;
        info!(
            "Wrote volume to {} in {:?}",
            header.display(),
            start.elapsed()
        );
    }

    Ok(())
}
