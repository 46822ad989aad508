use std::fmt::Debug;
use std::io::{self, Write};

/// A scalar type usable as the occupancy value of a voxel.
///
/// A voxel is occupied iff its value differs from [`Occupancy::EMPTY`]. Occupancy is flipped
/// by subtraction from [`Occupancy::FULL`], so toggling a voxel twice restores its value.
pub trait Occupancy: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// The value of an empty voxel.
    const EMPTY: Self;
    /// The value of an occupied voxel.
    const FULL: Self;
    /// The name of this type in the `ElementType` field of a MetaImage header.
    const MET_ELEMENT_TYPE: &'static str;

    /// The value of this voxel once its occupancy is flipped.
    fn toggled(self) -> Self;

    /// Writes this value as little-endian bytes.
    fn write_le(self, out: &mut dyn Write) -> io::Result<()>;
}

macro_rules! impl_occupancy(
    ($($t: ty, $empty: expr, $full: expr, $met: expr);*) => {$(
        impl Occupancy for $t {
            const EMPTY: Self = $empty;
            const FULL: Self = $full;
            const MET_ELEMENT_TYPE: &'static str = $met;

            #[inline]
            fn toggled(self) -> Self {
                Self::FULL - self
            }

            #[inline]
            fn write_le(self, out: &mut dyn Write) -> io::Result<()> {
                out.write_all(&self.to_le_bytes())
            }
        }
    )*}
);

impl_occupancy!(
    u8, 0, 1, "MET_UCHAR";
    u16, 0, 1, "MET_USHORT";
    u32, 0, 1, "MET_UINT";
    f32, 0.0, 1.0, "MET_FLOAT";
    f64, 0.0, 1.0, "MET_DOUBLE"
);
