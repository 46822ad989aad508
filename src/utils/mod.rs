//! Various unsorted geometrical and logical operators.

pub use self::point_in_triangle::{point_in_triangle_2d_sos, sos_orientation, Orientation};
pub use self::sorted_pair::SortedPair;

pub mod hashmap;
mod point_in_triangle;
mod sorted_pair;
