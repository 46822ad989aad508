use crate::bounding_volume::BoundingVolume;
use crate::partitioning::Bvh;
use crate::utils::hashmap::HashSet;

impl Bvh {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if it is topologically correct (internal indices are all valid and
    /// reached once, every leaf index is reported once) and geometrically correct (the AABB of a
    /// parent bounds the ones of its children).
    pub fn assert_well_formed(&self) {
        if self.is_empty() {
            return;
        } else if self.nodes[0].right.leaf_count() == 0 {
            assert_eq!(self.nodes[0].leaf_count(), 1);
            assert!(self.nodes[0].left.is_leaf());
            return;
        }

        let mut visited = HashSet::default();
        let mut leaves = HashSet::default();
        self.assert_well_formed_recurse(0, &mut visited, &mut leaves);

        assert_eq!(visited.len(), self.nodes.len(), "unreachable BVH nodes");
        assert_eq!(leaves.len() as u32, self.leaf_count(), "duplicate BVH leaves");
    }

    fn assert_well_formed_recurse(
        &self,
        node_id: u32,
        visited: &mut HashSet<u32>,
        leaves: &mut HashSet<u32>,
    ) {
        assert!(visited.insert(node_id), "loop detected in the BVH");

        let node = &self.nodes[node_id as usize];

        for child in [&node.left, &node.right] {
            if child.is_leaf() {
                assert!(leaves.insert(child.children));
            } else {
                let grand_children = &self.nodes[child.children as usize];
                assert_eq!(child.leaf_count(), grand_children.leaf_count());
                assert!(child.aabb().contains(&grand_children.left.aabb()));
                assert!(child.aabb().contains(&grand_children.right.aabb()));
                self.assert_well_formed_recurse(child.children, visited, leaves);
            }
        }
    }
}
