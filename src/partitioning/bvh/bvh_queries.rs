use super::{Bvh, BvhNode};
use crate::bounding_volume::Aabb;

impl Bvh {
    /// Iterates through all the leaves with an AABB intersecting the given `aabb`.
    ///
    /// Touching boxes intersect, and the query box may be flat along some axes: a vertical
    /// segment is a valid query.
    pub fn intersect_aabb<'a>(&'a self, aabb: &'a Aabb) -> impl Iterator<Item = u32> + 'a {
        self.leaves(|node: &BvhNode| node.intersects_aabb(aabb))
    }
}
