//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Point2, Real};
use crate::utils;

/// A triangle shape.
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The signed volume of the tetrahedron formed by this triangle and the origin.
    ///
    /// Summed over the facets of a closed mesh with outward normals, this gives the volume
    /// enclosed by the mesh.
    #[inline]
    pub fn signed_volume_from_origin(&self) -> Real {
        self.a.coords.dot(&self.b.coords.cross(&self.c.coords)) / 6.0
    }

    /// The AABB of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices())
    }

    /// Intersects this triangle with the vertical line passing through `(x, y)`.
    ///
    /// Returns the height of the intersection point if the projection of this triangle on the
    /// XY plane contains `(x, y)`. Points on the boundary of the projection are resolved with
    /// [`utils::point_in_triangle_2d_sos`], so that a vertical line crossing a closed surface
    /// exactly on a shared edge or vertex is reported by exactly one of the triangles sharing
    /// it. Triangles with a projection of zero area are never intersected.
    #[inline]
    pub fn vertical_line_intersection(&self, x: Real, y: Real) -> Option<Real> {
        let [wa, wb, wc] = utils::point_in_triangle_2d_sos(
            &Point2::new(x, y),
            &self.a.xy(),
            &self.b.xy(),
            &self.c.xy(),
        )?;
        Some(wa * self.a.z + wb * self.b.z + wc * self.c.z)
    }
}
