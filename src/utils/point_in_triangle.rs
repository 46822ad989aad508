//! Function to check if a point is inside a 2D triangle and related functions.
//!
//! The predicates of this module never report a point as lying exactly on an edge. Ties are
//! broken with Simulation of Simplicity: the query point is considered to be displaced by an
//! infinitesimal `(ε, ε²)`, the same displacement for every triangle. As a consequence, when a
//! point lies on an edge or a vertex shared by several triangles of a planar triangulation, it
//! is claimed by exactly one of them.

use crate::math::{Point2, Real};

#[derive(Eq, PartialEq, Debug, Copy, Clone)]
/// The orientation or winding direction of a corner or polygon.
pub enum Orientation {
    /// Counter-clockwise
    Ccw,
    /// Clockwise
    Cw,
    /// Neither (both points coincide).
    None,
}

impl Orientation {
    /// The orientation as a sign: `1` for [`Orientation::Ccw`], `-1` for [`Orientation::Cw`].
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Ccw => 1,
            Orientation::Cw => -1,
            Orientation::None => 0,
        }
    }
}

/// Computes the orientation of the triangle `(0, 0)`, `p1`, `p2`, with ties broken by
/// Simulation of Simplicity.
///
/// Returns the SoS-determined orientation together with twice the signed area
/// `p1.y * p2.x - p1.x * p2.y` of the triangle. With this convention, a triangle that winds
/// clockwise in a right-handed frame has a positive area and an [`Orientation::Ccw`] sign; only
/// the consistency of the signs matters to the callers.
///
/// If the area is exactly zero, the sign is determined lexicographically: first by comparing
/// `p2.y` with `p1.y`, then `p1.x` with `p2.x`. [`Orientation::None`] is returned only when
/// `p1 == p2`.
#[inline]
pub fn sos_orientation(p1: &Point2<Real>, p2: &Point2<Real>) -> (Orientation, Real) {
    let twice_signed_area = p1.y * p2.x - p1.x * p2.y;

    let orientation = if twice_signed_area > 0.0 {
        Orientation::Ccw
    } else if twice_signed_area < 0.0 {
        Orientation::Cw
    } else if p2.y > p1.y {
        Orientation::Ccw
    } else if p2.y < p1.y {
        Orientation::Cw
    } else if p1.x > p2.x {
        Orientation::Ccw
    } else if p1.x < p2.x {
        Orientation::Cw
    } else {
        Orientation::None
    };

    (orientation, twice_signed_area)
}

/// Robust test of `p` against the triangle `a`, `b`, `c`.
///
/// If `p` is inside of the triangle, returns its barycentric coordinates `[wa, wb, wc]`
/// (all with the same sign as the triangle area, and summing to one) such that
/// `p = wa * a + wb * b + wc * c`. Returns `None` otherwise.
///
/// Both orientations of the triangle are accepted. A triangle with a zero area never contains
/// any point, even if some of its tie-broken signs agree.
pub fn point_in_triangle_2d_sos(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
) -> Option<[Real; 3]> {
    let a = Point2::from(a - p);
    let b = Point2::from(b - p);
    let c = Point2::from(c - p);

    let (sign_a, wa) = sos_orientation(&b, &c);
    if sign_a == Orientation::None {
        return None;
    }

    let (sign_b, wb) = sos_orientation(&c, &a);
    if sign_b != sign_a {
        return None;
    }

    let (sign_c, wc) = sos_orientation(&a, &b);
    if sign_c != sign_a {
        return None;
    }

    let sum = wa + wb + wc;

    if sum == 0.0 {
        // Zero-area triangle: it is a segment when projected on the plane.
        return None;
    }

    Some([wa / sum, wb / sum, wc / sum])
}
