use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};

/// A node of the BVH: either a leaf, or an internal node with exactly two children.
#[derive(Copy, Clone, Debug)]
#[repr(C)]
pub struct BvhNode {
    /// Mins coordinates of the node’s bounding volume.
    pub(super) mins: Point<Real>,
    /// If this node is a leaf, the index of its facet. Otherwise, the index (into `Bvh::nodes`)
    /// of the pair of its children.
    pub(super) children: u32,
    /// Maxs coordinates of this node’s bounding volume.
    pub(super) maxs: Point<Real>,
    /// Number of leaves in the subtree rooted at this node. `1` for a leaf, `0` only for the
    /// missing right child of a root with a single leaf.
    pub(super) leaf_count: u32,
}

impl BvhNode {
    #[inline(always)]
    pub(super) fn zeros() -> Self {
        Self {
            mins: Point::origin(),
            children: 0,
            maxs: Point::origin(),
            leaf_count: 0,
        }
    }

    /// Initializes a leaf.
    #[inline(always)]
    pub fn leaf(aabb: Aabb, leaf_data: u32) -> BvhNode {
        Self {
            mins: aabb.mins,
            children: leaf_data,
            maxs: aabb.maxs,
            leaf_count: 1,
        }
    }

    /// Is this node a leaf?
    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        self.leaf_count == 1
    }

    /// The number of leaves below this node.
    #[inline(always)]
    pub fn leaf_count(&self) -> u32 {
        self.leaf_count
    }

    #[inline(always)]
    pub(super) fn merged(&self, other: &Self, children: u32) -> Self {
        Self {
            mins: self.mins.inf(&other.mins),
            children,
            maxs: self.maxs.sup(&other.maxs),
            leaf_count: self.leaf_count + other.leaf_count,
        }
    }

    /// This node’s AABB.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb {
            mins: self.mins,
            maxs: self.maxs,
        }
    }

    /// The center of this node’s AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        self.aabb().center()
    }

    /// Does this node’s AABB intersect the given AABB?
    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.aabb().intersects(aabb)
    }
}

/// The two children of an internal node, stored side by side.
#[derive(Copy, Clone, Debug)]
pub struct BvhNodeWide {
    pub(super) left: BvhNode,
    pub(super) right: BvhNode,
}

impl BvhNodeWide {
    #[inline(always)]
    pub(super) fn zeros() -> Self {
        Self {
            left: BvhNode::zeros(),
            right: BvhNode::zeros(),
        }
    }

    /// The node enclosing both children, with its children stored at `my_id`.
    #[inline(always)]
    pub(super) fn merged(&self, my_id: u32) -> BvhNode {
        self.left.merged(&self.right, my_id)
    }

    /// The number of leaves below these two nodes.
    #[inline(always)]
    pub fn leaf_count(&self) -> u32 {
        self.left.leaf_count + self.right.leaf_count
    }
}

/// A Bounding Volume Hierarchy over a fixed set of AABBs.
///
/// The tree is binary. `nodes[0]` stores the two children of the root; every other internal
/// node stores the index of its pair of children into `nodes`. Nodes are laid out in
/// depth-first order.
///
/// The tree is built once with a binned surface area heuristic and never updated. Each leaf
/// is associated to the index of its AABB in the slice it was built from.
#[derive(Clone, Debug, Default)]
pub struct Bvh {
    pub(super) nodes: Vec<BvhNodeWide>,
}

impl Bvh {
    /// An empty BVH.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new BVH with a slice of AABBs.
    ///
    /// Each leaf will be associated an index equal to its position into the slice. For example,
    /// the AABB `leaves[42]` is associated to the leaf with index 42.
    pub fn from_leaves(leaves: &[Aabb]) -> Self {
        Self::from_iter(leaves.iter().copied().enumerate())
    }

    /// Creates a new BVH with leaves given by an iterator.
    ///
    /// The iterator yields leaf index and aabbs. Indices are stored internally as `u32`.
    pub fn from_iter<It>(leaves: It) -> Self
    where
        It: IntoIterator<Item = (usize, Aabb)>,
    {
        let mut leaves: Vec<_> = leaves
            .into_iter()
            .map(|(leaf_id, aabb)| BvhNode::leaf(aabb, leaf_id as u32))
            .collect();
        let mut result = Self::new();

        // Handle special cases that don’t play well with the binned build.
        match leaves.len() {
            0 => {}
            1 => result.nodes.push(BvhNodeWide {
                left: leaves[0],
                right: BvhNode::zeros(),
            }),
            2 => result.nodes.push(BvhNodeWide {
                left: leaves[0],
                right: leaves[1],
            }),
            _ => {
                result.nodes.reserve(leaves.len());
                result.nodes.push(BvhNodeWide::zeros());
                result.build_range_binned(0, &mut leaves);
            }
        }

        log::debug!(
            "Built a BVH with {} leaves and depth {}.",
            result.leaf_count(),
            result.subtree_depth(0)
        );

        result
    }

    /// The AABB bounding everything contained by this BVH.
    pub fn root_aabb(&self) -> Aabb {
        match self.leaf_count() {
            0 => Aabb::new_invalid(),
            1 => self.nodes[0].left.aabb(),
            _ => self.nodes[0]
                .left
                .aabb()
                .merged(&self.nodes[0].right.aabb()),
        }
    }

    /// Does this tree not contain any leaf?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The number of leaves of this tree.
    pub fn leaf_count(&self) -> u32 {
        self.nodes.first().map(|root| root.leaf_count()).unwrap_or(0)
    }

    /// The depth of the sub-tree rooted at the node with index `node_id`.
    ///
    /// Set `node_id` to 0 to get the depth of the whole tree.
    pub fn subtree_depth(&self, node_id: u32) -> u32 {
        if node_id == 0 && self.nodes.is_empty() {
            return 0;
        } else if node_id == 0 && self.nodes.len() == 1 {
            return 1 + (self.nodes[0].right.leaf_count != 0) as u32;
        }

        let node = &self.nodes[node_id as usize];

        let left_depth = if node.left.is_leaf() {
            1
        } else {
            self.subtree_depth(node.left.children)
        };

        let right_depth = if node.right.is_leaf() {
            1
        } else {
            self.subtree_depth(node.right.children)
        };

        left_depth.max(right_depth) + 1
    }
}
