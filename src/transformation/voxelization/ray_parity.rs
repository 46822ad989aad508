use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::partitioning::FacetSpatialIndex;
use crate::shape::TriMesh;
use crate::transformation::voxelization::{
    CancelToken, Occupancy, VoxelGrid, VoxelizationError, VoxelizationParameters,
};
use ordered_float::OrderedFloat;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of grid rows classified between two checks of the cancellation token.
const ROWS_PER_BATCH: u32 = 16;

/// Statistics gathered while filling a grid with [`VoxelGrid::fill_ray_parity`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RayParityStats {
    /// The number of grid columns a ray was cast through.
    pub num_columns: usize,
    /// The total number of ray/surface crossings found.
    pub num_crossings: usize,
    /// The number of columns with an odd number of crossings.
    ///
    /// This is zero for a closed surface. A non-zero value hints at an open or self-intersecting
    /// input: the last crossing of these columns was ignored.
    pub num_odd_columns: usize,
}

impl RayParityStats {
    fn merge(&mut self, other: &Self) {
        self.num_columns += other.num_columns;
        self.num_crossings += other.num_crossings;
        self.num_odd_columns += other.num_odd_columns;
    }
}

/// A run of voxels `[z_lo, z_hi)` of the column `(x, y)` to toggle.
#[derive(Copy, Clone, Debug)]
struct ColumnSpan {
    x: u32,
    z_lo: u32,
    z_hi: u32,
}

#[derive(Default)]
struct RowSpans {
    y: u32,
    spans: Vec<ColumnSpan>,
    stats: RayParityStats,
}

impl<T: Occupancy> VoxelGrid<T> {
    /// Voxelizes a closed triangle mesh.
    ///
    /// This creates a grid covering the AABB of `mesh` with the given parameters, then fills it
    /// with [`VoxelGrid::fill_ray_parity`], using the BVH of the mesh as spatial index. If the
    /// classification is cancelled, the partially filled grid is dropped; use
    /// [`VoxelGrid::from_aabb`] followed by [`VoxelGrid::fill_ray_parity`] to keep it.
    pub fn voxelize(
        mesh: &TriMesh,
        params: &VoxelizationParameters,
        cancel: Option<&CancelToken>,
    ) -> Result<Self, VoxelizationError> {
        let mut grid = Self::from_aabb(mesh.local_aabb(), params)?;
        let _ = grid.fill_ray_parity(mesh, mesh.bvh(), cancel)?;
        Ok(grid)
    }

    /// Flips the occupancy of the voxels inside of `mesh`, using the even-odd rule.
    ///
    /// A vertical ray is cast through the center of each column of the grid. Its crossings with
    /// the surface, found with the help of `index`, are sorted by height and taken by pairs: the
    /// voxels of the column whose center lies between the two crossings of a pair are toggled.
    /// An unpaired last crossing is ignored. On a fresh grid, this leaves exactly the voxels
    /// with a center inside of a closed surface occupied.
    ///
    /// Crossings exactly on an edge or a vertex of the mesh are counted once thanks to the
    /// tie-breaking rule of [`point_in_triangle_2d_sos`](crate::utils::point_in_triangle_2d_sos).
    ///
    /// `index` must report (at least) all the triangles of `mesh` with an AABB intersecting the
    /// query box. It may report the same triangle several times.
    ///
    /// Rows of columns are processed by batches, in parallel if the `parallel` feature is
    /// enabled. `cancel` is checked before each batch. If it is cancelled, this returns
    /// [`VoxelizationError::Cancelled`] and the grid contains the result of the batches
    /// processed so far.
    pub fn fill_ray_parity<I: FacetSpatialIndex + ?Sized>(
        &mut self,
        mesh: &TriMesh,
        index: &I,
        cancel: Option<&CancelToken>,
    ) -> Result<RayParityStats, VoxelizationError> {
        let mesh_aabb = mesh.local_aabb();
        let z_range = [
            mesh_aabb.mins.z - self.spacing(),
            mesh_aabb.maxs.z + self.spacing(),
        ];
        let mut stats = RayParityStats::default();
        let num_rows = self.size().y;

        for batch_start in (0..num_rows).step_by(ROWS_PER_BATCH as usize) {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                log::debug!("Voxelization cancelled at row {}/{}.", batch_start, num_rows);
                return Err(VoxelizationError::Cancelled);
            }

            let batch = batch_start..(batch_start + ROWS_PER_BATCH).min(num_rows);
            let gather = |y| self.gather_row_spans(mesh, index, y, z_range);

            #[cfg(feature = "parallel")]
            let rows: Vec<RowSpans> = batch.into_par_iter().map(gather).collect();
            #[cfg(not(feature = "parallel"))]
            let rows: Vec<RowSpans> = batch.map(gather).collect();

            // Each span is owned by a single column, so applying them in any order is fine.
            for row in &rows {
                for span in &row.spans {
                    self.toggle_span(span.x, row.y, span.z_lo, span.z_hi);
                }

                stats.merge(&row.stats);
            }

            log::debug!(
                "Classified rows {}..{} of {}.",
                batch_start,
                batch_start + rows.len() as u32,
                num_rows
            );
        }

        if stats.num_odd_columns != 0 {
            log::debug!(
                "{} columns had an odd number of crossings; is the surface closed?",
                stats.num_odd_columns
            );
        }

        log::info!(
            "Ray-parity classification: {} columns, {} crossings, {} occupied voxels.",
            stats.num_columns,
            stats.num_crossings,
            self.num_occupied()
        );

        Ok(stats)
    }

    /// Computes the spans of voxels to toggle on each column of the row `y`.
    ///
    /// This only reads the grid geometry.
    fn gather_row_spans<I: FacetSpatialIndex + ?Sized>(
        &self,
        mesh: &TriMesh,
        index: &I,
        y: u32,
        z_range: [Real; 2],
    ) -> RowSpans {
        let mut result = RowSpans {
            y,
            ..Default::default()
        };
        let mut candidates = Vec::new();
        let mut heights = Vec::new();

        for x in 0..self.size().x {
            let center = self.voxel_center(&Point::new(x, y, 0));
            let query = Aabb::new(
                Point::new(center.x, center.y, z_range[0]),
                Point::new(center.x, center.y, z_range[1]),
            );

            candidates.clear();
            heights.clear();

            index.for_each_intersecting_facet(&query, &mut |facet| candidates.push(facet));

            // A triangle reported twice must not be counted as two crossings.
            candidates.sort_unstable();
            candidates.dedup();

            heights.extend(candidates.iter().filter_map(|facet| {
                mesh.triangle(*facet)
                    .vertical_line_intersection(center.x, center.y)
            }));
            heights.sort_unstable_by_key(|h| OrderedFloat(*h));

            result.stats.num_columns += 1;
            result.stats.num_crossings += heights.len();
            result.stats.num_odd_columns += heights.len() % 2;

            for pair in heights.chunks_exact(2) {
                let z_lo = self.height_to_layer(pair[0]);
                let z_hi = self.height_to_layer(pair[1]);

                if z_lo < z_hi {
                    result.spans.push(ColumnSpan { x, z_lo, z_hi });
                }
            }
        }

        result
    }

    /// The index of the first layer of voxels with a center above `height`, clamped to
    /// `[0, size.z]`.
    fn height_to_layer(&self, height: Real) -> u32 {
        let layer = ((height - self.origin().z) / self.spacing()).round();
        layer.clamp(0.0, self.size().z as Real) as u32
    }

    fn toggle_span(&mut self, x: u32, y: u32, z_lo: u32, z_hi: u32) {
        for z in z_lo..z_hi {
            let index = self.linear_index(&Point::new(x, y, z));
            self.toggle(index);
        }
    }
}
