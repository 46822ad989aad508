/// A volume bounding a set of primitives, used to cull BVH queries.
pub trait BoundingVolume {
    /// Do `self` and `other` share at least one point? Touching volumes intersect.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` entirely inside of `self`?
    fn contains(&self, other: &Self) -> bool;

    /// Grows `self` so it bounds `other` too.
    fn merge(&mut self, other: &Self);

    /// The smallest volume bounding both `self` and `other`.
    fn merged(&self, other: &Self) -> Self;
}
