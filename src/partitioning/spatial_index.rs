use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::partitioning::Bvh;

/// A spatial index over the facets of a surface mesh.
///
/// This is the only capability the occupancy classifier needs from an acceleration structure:
/// enumerating the facets whose bounding box may intersect a query box. Implementations may
/// report candidates in any order, and may report false positives or the same facet several
/// times; the classifier filters candidates with an exact test.
///
/// The index is queried concurrently from several threads during classification, hence the
/// `Sync` bound.
pub trait FacetSpatialIndex: Sync {
    /// Calls `f` with the index of every facet whose bounding box may intersect `aabb`.
    fn for_each_intersecting_facet(&self, aabb: &Aabb, f: &mut dyn FnMut(u32));
}

impl FacetSpatialIndex for Bvh {
    fn for_each_intersecting_facet(&self, aabb: &Aabb, f: &mut dyn FnMut(u32)) {
        for leaf in self.intersect_aabb(aabb) {
            f(leaf)
        }
    }
}

/// Brute-force index: the facet `i` is bounded by `self[i]`.
impl FacetSpatialIndex for [Aabb] {
    fn for_each_intersecting_facet(&self, aabb: &Aabb, f: &mut dyn FnMut(u32)) {
        for (i, facet_aabb) in self.iter().enumerate() {
            if facet_aabb.intersects(aabb) {
                f(i as u32)
            }
        }
    }
}

impl FacetSpatialIndex for Vec<Aabb> {
    fn for_each_intersecting_facet(&self, aabb: &Aabb, f: &mut dyn FnMut(u32)) {
        self.as_slice().for_each_intersecting_facet(aabb, f)
    }
}
