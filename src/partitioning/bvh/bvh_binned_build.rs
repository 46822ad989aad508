use super::bvh_tree::BvhNodeWide;
use super::{Bvh, BvhNode};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;

impl Bvh {
    /// Builds the subtree stored at `target_node_id` from `leaves`, splitting them along the
    /// axis of largest centroid spread with the plane minimizing the surface area heuristic.
    pub(super) fn build_range_binned(&mut self, target_node_id: u32, leaves: &mut [BvhNode]) {
        const NUM_BINS: usize = 8;
        const BIN_EPSILON: Real = 1.0e-5;

        debug_assert!(leaves.len() > 1);

        let centroid_aabb = Aabb::from_points(leaves.iter().map(|node| node.center()));
        let bins_axis = centroid_aabb.extents().imax();
        let bins_range = [centroid_aabb.mins[bins_axis], centroid_aabb.maxs[bins_axis]];

        let mut mid = 0;

        // All centroids coincide: there is no splitting plane to look for.
        if bins_range[1] > bins_range[0] {
            let k1 = NUM_BINS as Real * (1.0 - BIN_EPSILON) / (bins_range[1] - bins_range[0]);
            let k0 = bins_range[0];
            let bin_id = |node: &BvhNode| {
                ((k1 * (node.center()[bins_axis] - k0)) as usize).min(NUM_BINS - 1)
            };

            let mut bins = [BvhBin::default(); NUM_BINS];

            for leaf in &*leaves {
                let bin = &mut bins[bin_id(leaf)];
                bin.aabb.merge(&leaf.aabb());
                bin.leaf_count += 1;
            }

            // Select the best splitting plane (there are NUM_BINS - 1 splitting planes).
            let mut right_merges = bins;
            let mut right_acc = bins[NUM_BINS - 1];

            for i in 1..NUM_BINS - 1 {
                right_acc.aabb.merge(&right_merges[NUM_BINS - 1 - i].aabb);
                right_acc.leaf_count += right_merges[NUM_BINS - 1 - i].leaf_count;
                right_merges[NUM_BINS - 1 - i] = right_acc;
            }

            let mut best_cost = Real::MAX;
            let mut best_plane = 0;
            let mut left_merge = bins[0];

            for i in 0..NUM_BINS - 1 {
                let right = &right_merges[i + 1];

                if left_merge.leaf_count != 0 && right.leaf_count != 0 {
                    let cost = left_merge.cost() + right.cost();
                    if cost < best_cost {
                        best_cost = cost;
                        best_plane = i;
                        mid = left_merge.leaf_count as usize;
                    }
                }

                left_merge.aabb.merge(&bins[i + 1].aabb);
                left_merge.leaf_count += bins[i + 1].leaf_count;
            }

            if mid != 0 {
                // Stable in-place partition: leaves from bins `<= best_plane` first.
                leaves.sort_by_key(|leaf| bin_id(leaf) > best_plane);
            }
        }

        // In degenerate cases where all the leaves end up in the same bin,
        // just split the range in two.
        if mid == 0 || mid == leaves.len() {
            mid = leaves.len() / 2;
        }

        let (left_leaves, right_leaves) = leaves.split_at_mut(mid);

        if left_leaves.len() == 1 {
            self.nodes[target_node_id as usize].left = left_leaves[0];
        } else {
            let left_id = self.nodes.len() as u32;
            self.nodes.push(BvhNodeWide::zeros());
            self.build_range_binned(left_id, left_leaves);
            self.nodes[target_node_id as usize].left = self.nodes[left_id as usize].merged(left_id);
        }

        if right_leaves.len() == 1 {
            self.nodes[target_node_id as usize].right = right_leaves[0];
        } else {
            let right_id = self.nodes.len() as u32;
            self.nodes.push(BvhNodeWide::zeros());
            self.build_range_binned(right_id, right_leaves);
            self.nodes[target_node_id as usize].right =
                self.nodes[right_id as usize].merged(right_id);
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct BvhBin {
    aabb: Aabb,
    leaf_count: u32,
}

impl BvhBin {
    fn cost(&self) -> Real {
        // Flat leaves (e.g. axis-aligned facets) have a zero volume, so the half surface area is
        // a better measure here.
        let e = self.aabb.extents();
        (e.x * e.y + e.y * e.z + e.z * e.x) * self.leaf_count as Real
    }
}

impl Default for BvhBin {
    fn default() -> Self {
        Self {
            aabb: Aabb::new_invalid(),
            leaf_count: 0,
        }
    }
}
